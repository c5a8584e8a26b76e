use crate::config::DirectoryConfig;
use crate::discover::LinkDiscoverer;
use crate::extract::RecordExtractor;
use crate::fetch::PageFetcher;
use crate::results::{RecordEvent, StaffRecord};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};

/// Starts an async harvest and returns a receiver that yields one
/// `RecordEvent` per discovered detail page.
///
/// Detail pages are fetched concurrently up to `max_concurrency`, so events
/// may arrive out of listing order; each event carries the index of its
/// link in the discovery result.
pub async fn start(
    config: &DirectoryConfig,
    fetcher: Arc<dyn PageFetcher>,
) -> Result<mpsc::Receiver<RecordEvent>, Box<dyn Error>> {
    config.validate()?;

    let discoverer = LinkDiscoverer::new(config)?;
    let extractor = Arc::new(RecordExtractor::new()?);

    let (result_tx, result_rx) = mpsc::channel::<RecordEvent>(config.max_links);

    let listing_url = config.listing_url();
    let max_links = config.max_links;
    let semaphore = Arc::new(Semaphore::new(config.max_concurrency));

    ::log::info!("Starting harvest from: {}", listing_url);

    tokio::spawn(async move {
        let listing = fetcher.fetch(&listing_url).await;
        if listing.is_empty() {
            ::log::error!("Listing page fetch failed: {}", listing_url);
            return;
        }

        let discovery = discoverer.discover(&listing);
        if discovery.links.is_empty() {
            ::log::error!("No detail links found on {}", listing_url);
            return;
        }

        ::log::info!(
            "Found detail links (up to {}):\n{}",
            max_links,
            discovery.links.join("\n")
        );

        let mut handles = Vec::with_capacity(discovery.links.len());
        for (index, url) in discovery.links.into_iter().enumerate() {
            let fetcher = Arc::clone(&fetcher);
            let extractor = Arc::clone(&extractor);
            let semaphore = Arc::clone(&semaphore);
            let tx = result_tx.clone();

            handles.push(tokio::spawn(async move {
                // The semaphore is never closed, so acquire only fails
                // if the runtime is shutting down
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };

                let content = fetcher.fetch(&url).await;
                let record = if content.is_empty() {
                    ::log::warn!("Detail page fetch failed, emitting empty record: {}", url);
                    StaffRecord::absent()
                } else {
                    let record = extractor.extract(&content);
                    if record.is_empty() {
                        ::log::warn!("No fields extracted from {}", url);
                    }
                    record
                };

                if let Err(e) = tx.send(RecordEvent { index, url, record }).await {
                    ::log::error!("Failed to send record {}: {}", index, e);
                }
            }));
        }

        // Drop the original sender so the channel closes once every
        // detail task has finished
        drop(result_tx);

        let total = handles.len();
        for handle in handles {
            if let Err(e) = handle.await {
                ::log::error!("Detail page task failed: {}", e);
            }
        }
        ::log::info!("All {} detail pages processed", total);
    });

    Ok(result_rx)
}
