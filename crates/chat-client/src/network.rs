// crates/chat-client/src/network.rs

use tokio::net::{lookup_host, TcpStream};
use tracing::{error, info};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Resolve the configured host and open the TCP connection.
///
/// Tries each resolved address in turn; the last failure is reported.
pub async fn connect(config: &ClientConfig) -> Result<TcpStream, ClientError> {
    let addr = config.addr_string();
    info!("Connecting to {}...", addr);

    let candidates = lookup_host(&addr)
        .await
        .map_err(|source| ClientError::Connection {
            addr: addr.clone(),
            source,
        })?;

    let mut last_err = None;
    for candidate in candidates {
        match TcpStream::connect(candidate).await {
            Ok(stream) => {
                stream
                    .set_nodelay(true)
                    .map_err(|source| ClientError::Connection {
                        addr: addr.clone(),
                        source,
                    })?;
                info!("Connected to {}", candidate);
                return Ok(stream);
            }
            Err(e) => {
                error!("Connection to {} failed: {}", candidate, e);
                last_err = Some(e);
            }
        }
    }

    Err(ClientError::Connection {
        addr,
        source: last_err.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "host resolved to no addresses")
        }),
    })
}
