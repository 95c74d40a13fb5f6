use uuid::Uuid;

/// Client-side routes the API can ask the browser to navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRoute {
    EntryPage,
    CreateOrganisation,
    Dashboard,
    SiteAccess(Uuid),
}

impl AppRoute {
    pub fn path(&self) -> String {
        match self {
            AppRoute::EntryPage => "/".to_string(),
            AppRoute::CreateOrganisation => "/admin/create-org".to_string(),
            AppRoute::Dashboard => "/admin/dashboard".to_string(),
            AppRoute::SiteAccess(site_id) => format!("/site/{}", site_id),
        }
    }
}
