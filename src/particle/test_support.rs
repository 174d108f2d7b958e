use crate::app_config::AppConfigBuilder;
use crate::particle::ParticleClient;
use mockito::Matcher;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Matches `path` with or without a query string.
pub fn path(path: &str) -> Matcher {
    Matcher::Regex(format!(r"^{}(\?.*)?$", path))
}

pub fn client_for(url: String) -> ParticleClient {
    ParticleClient::new(Arc::new(AppConfigBuilder::new().particle_url(url).build())).expect("Could not build client")
}

pub fn client_with_timeouts(url: String, get_timeout: Duration, post_timeout: Duration) -> ParticleClient {
    let config = AppConfigBuilder::new().particle_url(url).timeouts(get_timeout, post_timeout).build();
    ParticleClient::new(Arc::new(config)).expect("Could not build client")
}

/// Accepts connections and never answers them.
pub async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Could not bind listener");
    let address = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        let mut sockets = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            sockets.push(socket);
        }
    });
    format!("http://{}", address)
}
