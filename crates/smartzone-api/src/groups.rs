// AP group endpoints, scoped under a zone.

use tracing::debug;

use crate::client::SmartZoneClient;
use crate::error::{Error, PartialList};
use crate::models::{ApGroup, ListResponse, NamedObject};
use crate::paginate::collect_pages;
use crate::query::ListOptions;

impl SmartZoneClient {
    /// One page of AP groups in a zone.
    ///
    /// `GET /rkszones/{zone_id}/apgroups`
    pub async fn list_ap_groups(
        &self,
        zone_id: &str,
        options: &ListOptions,
    ) -> Result<ListResponse<NamedObject>, Error> {
        let url = self.public_url(&["rkszones", zone_id, "apgroups"])?;
        self.get(url, options).await
    }

    /// Every AP group in a zone.
    pub async fn list_all_ap_groups(
        &self,
        zone_id: &str,
        options: &ListOptions,
    ) -> Result<Vec<NamedObject>, PartialList<NamedObject>> {
        let url = self.public_url(&["rkszones", zone_id, "apgroups"])?;
        debug!(zone_id, "listing all AP groups");
        collect_pages(options, move |page| {
            let url = url.clone();
            async move { self.get::<ListResponse<NamedObject>>(url, &page).await }
        })
        .await
    }

    /// Configuration and membership of one AP group.
    ///
    /// `GET /rkszones/{zone_id}/apgroups/{group_id}`
    pub async fn get_ap_group(&self, zone_id: &str, group_id: &str) -> Result<ApGroup, Error> {
        let url = self.public_url(&["rkszones", zone_id, "apgroups", group_id])?;
        debug!(zone_id, group_id, "fetching AP group");
        self.get(url, &ListOptions::default()).await
    }
}
