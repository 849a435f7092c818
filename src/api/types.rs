//! Response type definitions for the profile, post and GraphQL endpoints.

use serde::Deserialize;

/// The `window._sharedData` blob embedded in profile and post pages.
#[derive(Debug, Deserialize)]
pub struct SharedData {
    pub entry_data: EntryData,
}

#[derive(Debug, Deserialize)]
pub struct EntryData {
    #[serde(rename = "ProfilePage", default)]
    pub profile_page: Vec<ProfilePage>,
    #[serde(rename = "PostPage", default)]
    pub post_page: Vec<PostPage>,
}

#[derive(Debug, Deserialize)]
pub struct ProfilePage {
    pub graphql: ProfileGraphql,
}

#[derive(Debug, Deserialize)]
pub struct ProfileGraphql {
    pub user: ProfileUser,
}

/// Account information from the profile page.
#[derive(Debug, Deserialize)]
pub struct ProfileUser {
    pub id: String,
    pub edge_owner_to_timeline_media: TimelineMedia,
}

/// One page of the account's timeline.
#[derive(Debug, Deserialize)]
pub struct TimelineMedia {
    pub page_info: PageInfo,
    #[serde(default)]
    pub edges: Vec<Edge<TimelineNode>>,
}

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// A post as listed in the timeline.
#[derive(Debug, Deserialize)]
pub struct TimelineNode {
    pub shortcode: String,
    #[serde(default)]
    pub is_video: bool,
    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    pub display_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostPage {
    pub graphql: PostGraphql,
}

#[derive(Debug, Deserialize)]
pub struct PostGraphql {
    pub shortcode_media: ShortcodeMedia,
}

/// Full media detail of one post.
#[derive(Debug, Deserialize)]
pub struct ShortcodeMedia {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub display_url: Option<String>,
    pub video_url: Option<String>,
    pub edge_sidecar_to_children: Option<SidecarChildren>,
}

#[derive(Debug, Deserialize)]
pub struct SidecarChildren {
    #[serde(default)]
    pub edges: Vec<Edge<SidecarNode>>,
}

/// One child of a gallery post.
#[derive(Debug, Deserialize)]
pub struct SidecarNode {
    #[serde(default)]
    pub is_video: bool,
    pub display_url: Option<String>,
    pub video_url: Option<String>,
}

/// GraphQL pagination response.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<GraphqlData>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlData {
    #[serde(default)]
    pub user: Option<GraphqlUser>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlUser {
    pub edge_owner_to_timeline_media: Option<TimelineMedia>,
}

/// Typename of a single image post.
pub const TYPENAME_IMAGE: &str = "GraphImage";
/// Typename of a single video post.
pub const TYPENAME_VIDEO: &str = "GraphVideo";
/// Typename of a gallery post.
pub const TYPENAME_SIDECAR: &str = "GraphSidecar";
