use api::{ApiConfig, HttpClient};
use dioxus::prelude::*;

/// The shared [`HttpClient`] provided by [`ApiProvider`].
pub fn use_api() -> HttpClient {
    use_context::<HttpClient>()
}

/// Provider component that builds the API client from configuration.
/// Wrap your app with this component before any view that fetches data.
#[component]
pub fn ApiProvider(children: Element) -> Element {
    use_context_provider(|| {
        let config = ApiConfig::from_env_or_default();
        tracing::info!("Using backend at {}", config.base_url);
        HttpClient::from_config(&config)
    });

    rsx! {
        {children}
    }
}
