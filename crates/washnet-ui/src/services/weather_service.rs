//! Weather backend: async weather fetching.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Handle;
use washnet_weather::{WeatherData, WeatherProvider};

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Live or demo data; fetching never fails
    FetchDone(WeatherData),
}

/// Request to fetch weather data asynchronously.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &Sender<WeatherServiceMessage>,
    runtime: &Handle,
    provider: Arc<WeatherProvider>,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let data = provider.fetch().await;
        if tx.send(WeatherServiceMessage::FetchDone(data)).is_err() {
            tracing::debug!("Weather receiver dropped before fetch finished");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;
    use washnet_core::WeatherConfig;
    use washnet_weather::ForecastSource;

    #[test]
    fn test_fetch_without_key_delivers_demo_data() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let provider = WeatherProvider::from_config(&WeatherConfig::default()).unwrap();
        let (tx, rx) = mpsc::channel();

        request_fetch(&tx, runtime.handle(), Arc::new(provider));

        let WeatherServiceMessage::FetchDone(data) =
            rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(data.forecast.source(), ForecastSource::Demo);
        assert_eq!(data.forecast.len(), 40);
    }
}
