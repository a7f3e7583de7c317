pub mod pages;
mod templates;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

use anyhow::Result;
use tokio::net::TcpListener;

pub async fn serve(listener: TcpListener, state: pages::AppState) -> Result<()> {
    let app = pages::build_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}
