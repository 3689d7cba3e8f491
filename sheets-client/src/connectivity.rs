//! Connectivity probing
//!
//! Before burning the retry budget on a backend call, check whether the
//! network is reachable at all. Any HTTP answer from the origin, even an
//! error status, proves connectivity; only transport failures count as
//! offline.

use std::time::Duration;

/// Probe timeout; a reachable origin answers well within this.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// One cheap GET against the origin. `true` means some HTTP answer came
/// back.
pub async fn is_online(client: &reqwest::Client, origin: &str) -> bool {
    client
        .get(origin)
        .timeout(PROBE_TIMEOUT)
        .send()
        .await
        .is_ok()
}

/// Poll the origin until it answers or the deadline passes.
pub async fn wait_for_online(
    client: &reqwest::Client,
    origin: &str,
    poll_interval: Duration,
    deadline: Duration,
) -> bool {
    let wait = async {
        loop {
            if is_online(client, origin).await {
                return;
            }
            tokio::time::sleep(poll_interval).await;
        }
    };
    tokio::time::timeout(deadline, wait).await.is_ok()
}
