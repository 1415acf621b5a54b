// Zone endpoints
//
// Zones (`rkszones`) are the top-level AP containers on the controller.

use tracing::debug;

use crate::client::SmartZoneClient;
use crate::error::{Error, PartialList};
use crate::models::{ListResponse, NamedObject, Zone};
use crate::paginate::collect_pages;
use crate::query::ListOptions;

impl SmartZoneClient {
    /// One page of zones.
    ///
    /// `GET /rkszones`
    pub async fn list_zones(&self, options: &ListOptions) -> Result<ListResponse<NamedObject>, Error> {
        let url = self.public_url(&["rkszones"])?;
        self.get(url, options).await
    }

    /// Every zone, following `hasMore` across pages.
    pub async fn list_all_zones(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<NamedObject>, PartialList<NamedObject>> {
        let url = self.public_url(&["rkszones"])?;
        debug!("listing all zones");
        collect_pages(options, move |page| {
            let url = url.clone();
            async move { self.get::<ListResponse<NamedObject>>(url, &page).await }
        })
        .await
    }

    /// Full configuration of one zone.
    ///
    /// `GET /rkszones/{zone_id}`
    pub async fn get_zone(&self, zone_id: &str) -> Result<Zone, Error> {
        let url = self.public_url(&["rkszones", zone_id])?;
        debug!(zone_id, "fetching zone");
        self.get(url, &ListOptions::default()).await
    }
}
