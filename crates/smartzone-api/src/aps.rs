// Access point endpoints
//
// Inventory, configuration, and operational calls for individual APs. Port
// status and reboot live on the controller's internal `scg` API rather than
// the versioned public one.

use tracing::{debug, info, warn};

use crate::client::SmartZoneClient;
use crate::error::{Error, PartialList};
use crate::models::{
    Ap, ApQueryRecord, ApSummary, ApUpdate, ListResponse, LldpNeighbor, PortStatus,
    PortStatusResponse,
};
use crate::paginate::collect_pages;
use crate::query::{ApQuery, ListOptions};

/// `{ "success": bool }` acknowledgement from the scg API.
#[derive(serde::Deserialize)]
struct Ack {
    #[serde(default)]
    success: bool,
}

impl SmartZoneClient {
    // ── Inventory ────────────────────────────────────────────────────

    /// One page of APs.
    ///
    /// `GET /aps`
    pub async fn list_aps(&self, options: &ListOptions) -> Result<ListResponse<ApSummary>, Error> {
        let url = self.public_url(&["aps"])?;
        self.get(url, options).await
    }

    /// Every AP visible to the session.
    pub async fn list_all_aps(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<ApSummary>, PartialList<ApSummary>> {
        let url = self.public_url(&["aps"])?;
        debug!("listing all APs");
        collect_pages(options, move |page| {
            let url = url.clone();
            async move { self.get::<ListResponse<ApSummary>>(url, &page).await }
        })
        .await
    }

    /// Every AP with operational detail, using the default query (all
    /// attributes, sorted by MAC).
    pub async fn query_aps(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<ApQueryRecord>, PartialList<ApQueryRecord>> {
        self.query_aps_with(&ApQuery::default(), options).await
    }

    /// Every AP matching `query`.
    ///
    /// `POST /query/ap`, paged through `index`/`listSize` like the GET lists.
    pub async fn query_aps_with(
        &self,
        query: &ApQuery,
        options: &ListOptions,
    ) -> Result<Vec<ApQueryRecord>, PartialList<ApQueryRecord>> {
        let url = self.public_url(&["query", "ap"])?;
        debug!(filters = query.filters.len(), "querying APs");
        collect_pages(options, move |page| {
            let url = url.clone();
            async move {
                self.post::<ListResponse<ApQueryRecord>>(url, query, &page)
                    .await
            }
        })
        .await
    }

    /// Configuration of one AP.
    ///
    /// `GET /aps/{mac}`
    pub async fn get_ap(&self, mac: &str) -> Result<Ap, Error> {
        let url = self.public_url(&["aps", mac])?;
        debug!(mac, "fetching AP");
        self.get(url, &ListOptions::default()).await
    }

    /// Move or rename an AP.
    ///
    /// `PATCH /aps/{mac}` with `{ zoneId, apGroupId, name }`; the controller
    /// answers with an empty body.
    pub async fn update_ap(&self, mac: &str, update: &ApUpdate) -> Result<(), Error> {
        let url = self.public_url(&["aps", mac])?;
        debug!(mac, name = %update.name, "updating AP");
        self.patch(url, update).await
    }

    // ── Neighbors / uplink ───────────────────────────────────────────

    /// LLDP neighbors seen on the AP's wired ports.
    ///
    /// `GET /aps/{mac}/apLldpNeighbors`
    pub async fn ap_lldp_neighbors(
        &self,
        mac: &str,
        options: &ListOptions,
    ) -> Result<ListResponse<LldpNeighbor>, Error> {
        let url = self.public_url(&["aps", mac, "apLldpNeighbors"])?;
        self.get(url, options).await
    }

    /// First LLDP neighbor of the AP, `None` if it sees none.
    pub async fn ap_lldp_neighbor(&self, mac: &str) -> Result<Option<LldpNeighbor>, Error> {
        let neighbors = self.ap_lldp_neighbors(mac, &ListOptions::default()).await?;
        Ok(neighbors.list.into_iter().next())
    }

    /// Uplink port status of an AP.
    ///
    /// `GET {scg}/aps/{mac}`. Returns `None` when the AP reports no LAN ports
    /// and [`Error::RemoteFailure`] when the controller answers
    /// `success: false`.
    pub async fn ap_port_status(&self, mac: &str) -> Result<Option<PortStatus>, Error> {
        let url = self.scg_url(&["aps", mac])?;
        let resp: PortStatusResponse = self.get(url, &ListOptions::default()).await?;
        if !resp.success {
            return Err(Error::RemoteFailure {
                operation: "port status",
            });
        }
        Ok(resp.uplink())
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Ask the controller to reboot an AP. Returns the controller's
    /// `success` flag.
    ///
    /// `GET {scg}/aps/{mac}/reboot`
    pub async fn reboot_ap(&self, mac: &str) -> Result<bool, Error> {
        let url = self.scg_url(&["aps", mac, "reboot"])?;
        let ack: Ack = self.get(url, &ListOptions::default()).await?;
        if ack.success {
            info!(mac, "AP reboot accepted");
        } else {
            warn!(mac, "controller declined AP reboot");
        }
        Ok(ack.success)
    }
}
