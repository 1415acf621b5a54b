// Controller cluster endpoints

use crate::client::SmartZoneClient;
use crate::error::Error;
use crate::models::{ControllerInfo, ListResponse};
use crate::query::ListOptions;

impl SmartZoneClient {
    /// Cluster node summary.
    ///
    /// `GET /controller`
    pub async fn controller_summary(
        &self,
        options: &ListOptions,
    ) -> Result<ListResponse<ControllerInfo>, Error> {
        let url = self.public_url(&["controller"])?;
        self.get(url, options).await
    }
}
