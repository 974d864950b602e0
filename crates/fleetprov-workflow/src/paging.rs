//! Shared pagination pattern for the registry listings.

use std::future::Future;

use fleetprov_core::{
    CertificateSummary, DeviceRegistry, DeviceSummary, Page, PolicySummary, Result,
};

/// Drive a paginated listing to exhaustion, accumulating items in page
/// order.
///
/// `fetch` is called with the continuation token of the previous page
/// (`None` for the first) until a page arrives without one. Accumulation
/// is unbounded; callers own the memory trade-off.
pub async fn collect_all<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut cursor = None;

    loop {
        let page = fetch(cursor.take()).await?;
        items.extend(page.items);
        match page.next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Ok(items)
}

/// Every registered device, in listing order
pub async fn list_all_devices<R>(registry: &R, page_size: i32) -> Result<Vec<DeviceSummary>>
where
    R: DeviceRegistry + ?Sized,
{
    collect_all(|token| registry.list_devices(page_size, token)).await
}

/// Every registered certificate, in listing order
pub async fn list_all_certificates<R>(
    registry: &R,
    page_size: i32,
) -> Result<Vec<CertificateSummary>>
where
    R: DeviceRegistry + ?Sized,
{
    collect_all(|marker| registry.list_certificates(page_size, marker)).await
}

/// Every registered policy, in listing order
pub async fn list_all_policies<R>(registry: &R, page_size: i32) -> Result<Vec<PolicySummary>>
where
    R: DeviceRegistry + ?Sized,
{
    collect_all(|marker| registry.list_policies(page_size, marker)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryRegistry;
    use fleetprov_core::ProvisionError;

    #[tokio::test]
    async fn accumulates_pages_in_order() {
        // Pages of {2, 2, 1} with tokens on the first two.
        let registry = MemoryRegistry::with_devices(5);

        let devices = list_all_devices(&registry, 2).await.unwrap();
        assert_eq!(devices.len(), 5);
        let names: Vec<&str> = devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["device_0", "device_1", "device_2", "device_3", "device_4"]
        );
    }

    #[tokio::test]
    async fn single_page_listing_stops_immediately() {
        let registry = MemoryRegistry::with_devices(2);

        let devices = list_all_devices(&registry, 10).await.unwrap();
        assert_eq!(devices.len(), 2);
    }

    #[tokio::test]
    async fn empty_listing_yields_no_items() {
        let registry = MemoryRegistry::default();
        let devices = list_all_devices(&registry, 2).await.unwrap();
        assert!(devices.is_empty());
    }

    #[tokio::test]
    async fn page_errors_propagate() {
        let result: Result<Vec<u32>> = collect_all(|_| async {
            Err(ProvisionError::service("ListThings", "throttled"))
        })
        .await;
        assert!(result.is_err());
    }
}
