use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use log::debug;
use surge_ping::{Client, Config, ICMP, IcmpPacket, PingIdentifier, PingSequence, Pinger};

use crate::ping::{ProbeError, ProbeOutcome, ProbeRequest, Prober};

/// Checks that a hostname holds only valid characters (alphanumeric, dots, hyphens)
fn is_valid_hostname(hostname: &str) -> bool {
    !hostname.is_empty()
        && hostname
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
}

/// Resolve hostname to IP address
pub async fn resolve_target(target: &str) -> Result<IpAddr, ProbeError> {
    let target = target.trim();

    // Try parsing as IP address first
    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(ip);
    }

    if !is_valid_hostname(target) {
        return Err(ProbeError::InvalidHost(target.to_string()));
    }

    let mut addrs = tokio::net::lookup_host(format!("{target}:0"))
        .await
        .map_err(|source| ProbeError::Resolve {
            host: target.to_string(),
            source,
        })?;
    addrs
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| ProbeError::NoAddress(target.to_string()))
}

/// ICMP echo prober backed by `surge-ping`.
///
/// The host is resolved once in [`IcmpProber::connect`]; every later probe reuses
/// the resolved address and socket.
pub struct IcmpProber {
    target_ip: IpAddr,
    client: Client,
    identifier: PingIdentifier,
    sequence: u16,
}

impl IcmpProber {
    pub async fn connect(host: &str) -> Result<Self, ProbeError> {
        let target_ip = resolve_target(host).await?;

        let config = match target_ip {
            IpAddr::V4(_) => Config::default(),
            IpAddr::V6(_) => Config::builder().kind(ICMP::V6).build(),
        };
        let client = Client::new(&config).map_err(ProbeError::Socket)?;
        debug!("resolved {host} to {target_ip}");

        Ok(Self {
            target_ip,
            client,
            identifier: PingIdentifier(std::process::id() as u16),
            sequence: 0,
        })
    }

    pub fn target_ip(&self) -> IpAddr {
        self.target_ip
    }

    async fn ping_once(&mut self, pinger: &mut Pinger, payload: &[u8]) -> ProbeOutcome {
        let sequence = PingSequence(self.sequence);
        self.sequence = self.sequence.wrapping_add(1);

        match pinger.ping(sequence, payload).await {
            Ok((IcmpPacket::V4(_), duration)) | Ok((IcmpPacket::V6(_), duration)) => {
                let response_time_ms = duration.as_secs_f64() * 1000.0;
                ProbeOutcome::success(Local::now(), response_time_ms)
            }
            Err(e) => {
                debug!("probe {} to {} failed: {e}", sequence.0, self.target_ip);
                ProbeOutcome::failure(Local::now())
            }
        }
    }
}

#[async_trait]
impl Prober for IcmpProber {
    async fn probe(&mut self, request: &ProbeRequest) -> Result<Vec<ProbeOutcome>, ProbeError> {
        let mut pinger = self.client.pinger(self.target_ip, self.identifier).await;
        pinger.timeout(request.timeout);
        let payload = vec![0u8; request.size];

        let mut outcomes = Vec::with_capacity(request.count as usize);
        for i in 0..request.count {
            if i > 0 && request.interval > Duration::ZERO {
                tokio::time::sleep(request.interval).await;
            }
            outcomes.push(self.ping_once(&mut pinger, &payload).await);
        }
        Ok(outcomes)
    }
}
