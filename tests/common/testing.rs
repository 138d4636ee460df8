use std::time::Duration;

/// Polls `condition` every few milliseconds until it holds, panicking after
/// two seconds. Used to observe listener-driven state changes without
/// racing them.
pub async fn wait_until(description: &str, mut condition: impl FnMut() -> bool) {
    for _ in 0..400 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting until {description}");
}
