use anyhow::Result;
use chrono::Utc;
use futflare_engine::{ListPresentation, MemoryLocation, QueryLocation, QueryState};
use futflare_runtime::Error;
use futflare_types::PageLimit;

use crate::commands::Context;
use crate::presentation;
use crate::types::{OutputFormat, SortOrder};

pub struct ListArgs {
    pub link: Option<String>,
    pub sort: Option<SortOrder>,
    pub limit: Option<PageLimit>,
    pub search: Option<String>,
    pub page: Option<u32>,
}

/// Query for the listing: the shared link first, then each flag applied the
/// way the UI applies it, so limit and search rebase to page 1 unless a page
/// is given explicitly.
pub fn build_query(args: &ListArgs) -> QueryState {
    let mut query = args
        .link
        .as_deref()
        .map(|link| {
            let link = link.rsplit_once('?').map(|(_, q)| q).unwrap_or(link);
            QueryState::from_query_string(link)
        })
        .unwrap_or_default();

    if let Some(sort) = args.sort {
        query.set_sort_by(sort.into());
    }
    if let Some(limit) = args.limit {
        query.set_limit(limit);
    }
    if let Some(search) = &args.search {
        query.set_search(search.trim());
    }
    if let Some(page) = args.page {
        query.set_page(page);
    }
    query
}

pub async fn handle(ctx: &Context, args: ListArgs) -> Result<()> {
    let query = build_query(&args);
    let client = ctx.client()?;
    let mut listing = client.listing(MemoryLocation::new(query.to_query_string()));

    listing.refresh().await.map_err(Error::from)?;
    let link = listing.location().query();

    match ctx.format {
        OutputFormat::Json => {
            let (items, total_count, total_pages) = match listing.presentation() {
                ListPresentation::Populated {
                    items,
                    total_count,
                    pagination,
                } => (items.to_vec(), total_count, pagination.total_pages),
                _ => (Vec::new(), 0, 0),
            };
            let value = serde_json::json!({
                "query": listing.query(),
                "link": link,
                "data": items,
                "totalCount": total_count,
                "totalPages": total_pages,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Plain => match listing.presentation() {
            ListPresentation::Populated {
                items,
                total_count,
                pagination,
            } => print!(
                "{}",
                presentation::render_capsule_list(
                    items,
                    total_count,
                    &pagination,
                    &link,
                    Utc::now(),
                    ctx.color
                )
            ),
            _ => print!("{}", presentation::render_empty_list(&link)),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futflare_types::SortBy;

    fn args() -> ListArgs {
        ListArgs {
            link: None,
            sort: None,
            limit: None,
            search: None,
            page: None,
        }
    }

    #[test]
    fn test_no_flags_is_the_default_view() {
        assert!(build_query(&args()).is_default());
    }

    #[test]
    fn test_link_is_read_from_a_full_url() {
        let query = build_query(&ListArgs {
            link: Some("https://futflare.app/capsules?sortBy=oldest&page=3".to_string()),
            ..args()
        });
        assert_eq!(query.sort_by, SortBy::Oldest);
        assert_eq!(query.page, 3);
    }

    #[test]
    fn test_search_and_limit_rebase_the_linked_page() {
        let query = build_query(&ListArgs {
            link: Some("page=3".to_string()),
            search: Some(" cats ".to_string()),
            ..args()
        });
        assert_eq!(query.page, 1);
        assert_eq!(query.search, "cats");

        let query = build_query(&ListArgs {
            link: Some("page=3".to_string()),
            limit: Some(PageLimit::Ten),
            page: Some(2),
            ..args()
        });
        assert_eq!(query.page, 2);
        assert_eq!(query.to_query_string(), "page=2&limit=10");
    }
}
