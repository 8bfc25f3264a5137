//! Source registration endpoints

use scanplane_core::domain::source::Source;
use scanplane_core::dto::source::{CreateSource, CreateSourceResponse};

use crate::ControlPlaneClient;
use crate::error::Result;

impl ControlPlaneClient {
    // =============================================================================
    // Source Registration
    // =============================================================================

    /// Register a new source
    ///
    /// # Returns
    /// The pending source, its enroll token and agent install commands
    ///
    /// # Example
    /// ```no_run
    /// # use scanplane_client::ControlPlaneClient;
    /// # use scanplane_core::domain::source::SourceOs;
    /// # use scanplane_core::dto::source::CreateSource;
    /// # async fn example() -> scanplane_client::Result<()> {
    /// let client = ControlPlaneClient::new("http://localhost:8080");
    /// let created = client.create_source(CreateSource {
    ///     name: "my-vm".to_string(),
    ///     os: SourceOs::Linux,
    /// }).await?;
    /// println!("{}", created.install.linux);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_source(&self, req: CreateSource) -> Result<CreateSourceResponse> {
        let url = self.endpoint(&["sources"])?;
        let response = self.client.post(url).json(&req).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Source Query
    // =============================================================================

    /// List all registered sources
    pub async fn list_sources(&self) -> Result<Vec<Source>> {
        let url = self.endpoint(&["sources"])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    /// Get details for a specific source
    ///
    /// # Arguments
    /// * `source_id` - The source ID
    pub async fn get_source(&self, source_id: &str) -> Result<Source> {
        let url = self.endpoint(&["sources", source_id])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }
}
