use crate::app::App;
use crate::domain::account::{
    MatchUpdate, NewMatch, NewSavedSearch, NewShortlist, SavedSearchUpdate, SavedSearchView,
    ShortlistUpdate,
};
use crate::domain::builder::BuildEnquiry;
use crate::domain::listing::{ListingKind, ListingRef};
use crate::domain::matching::compatibility_score;
use crate::domain::{SearchCriteria, SortKey};
use crate::errors::ServerError;
use crate::responses::{json_ok, json_response, no_content, ResultResp};
use astra::Request;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::HashMap;

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = parse_query(&req);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    tracing::debug!(%method, %path, "request");

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["health"]) => json_ok(&json!({ "status": "ok" })),

        // Listings
        ("GET", ["api", "land"]) => json_ok(&app.listings.fetch_land_listings()),
        ("GET", ["api", "concepts"]) => json_ok(&app.listings.fetch_concept_plans()),
        ("GET", ["api", "showcase"]) => json_ok(&app.listings.fetch_showcase_projects()),
        ("GET", ["api", "properties"]) => {
            let criteria = SearchCriteria::from_params(&query);
            let sort = parse_sort(&query)?;
            json_ok(&app.listings.search(&criteria, sort))
        }
        ("GET", ["api", "properties", id]) => {
            json_ok(&app.listings.fetch_property_by_id(parse_id(id)?)?)
        }
        ("GET", ["api", "properties", kind, id]) => {
            let kind = parse_kind(kind)?;
            json_ok(&app.listings.fetch_property(kind, parse_id(id)?)?)
        }
        ("POST", ["api", "admin", "reload"]) => {
            let installed = app.listings.reload()?;
            json_ok(&json!({ "reloaded": installed }))
        }

        // Matches
        ("GET", ["api", "matches"]) => json_ok(&app.accounts.list_matches()?),
        ("POST", ["api", "matches"]) => {
            let new: NewMatch = read_json(&mut req)?;
            let land = app.listings.land_by_id(new.land_listing_id)?;
            let concept = app.listings.concept_by_id(new.concept_plan_id)?;
            let score = compatibility_score(&land, &concept);
            let created = app.accounts.create_match(new, score)?;
            tracing::info!(id = created.id, score, "match created");
            json_response(201, &created)
        }
        ("GET", ["api", "matches", "score"]) => {
            let land_id = required_id(&query, "landId")?;
            let concept_id = required_id(&query, "conceptId")?;
            let land = app.listings.land_by_id(land_id)?;
            let concept = app.listings.concept_by_id(concept_id)?;
            json_ok(&json!({
                "landListingId": land_id,
                "conceptPlanId": concept_id,
                "compatibilityScore": compatibility_score(&land, &concept),
            }))
        }
        ("GET", ["api", "matches", id]) => json_ok(&app.accounts.get_match(parse_id(id)?)?),
        ("PATCH", ["api", "matches", id]) => {
            let id = parse_id(id)?;
            let update: MatchUpdate = read_json(&mut req)?;
            json_ok(&app.accounts.update_match(id, update)?)
        }
        ("DELETE", ["api", "matches", id]) => {
            app.accounts.delete_match(parse_id(id)?)?;
            no_content()
        }

        // Shortlists
        ("GET", ["api", "shortlists"]) => json_ok(&app.accounts.list_shortlists()?),
        ("POST", ["api", "shortlists"]) => {
            let new: NewShortlist = read_json(&mut req)?;
            json_response(201, &app.accounts.create_shortlist(new)?)
        }
        ("GET", ["api", "shortlists", id]) => {
            json_ok(&app.accounts.get_shortlist(parse_id(id)?)?)
        }
        ("PATCH", ["api", "shortlists", id]) => {
            let id = parse_id(id)?;
            let update: ShortlistUpdate = read_json(&mut req)?;
            json_ok(&app.accounts.update_shortlist(id, update)?)
        }
        ("DELETE", ["api", "shortlists", id]) => {
            app.accounts.delete_shortlist(parse_id(id)?)?;
            no_content()
        }
        ("POST", ["api", "shortlists", id, "items"]) => {
            let id = parse_id(id)?;
            let item: ListingRef = read_json(&mut req)?;
            json_ok(&app.accounts.add_item_to_shortlist(id, item)?)
        }
        ("DELETE", ["api", "shortlists", id, "items", kind, item_id]) => {
            let item = ListingRef::new(parse_kind(kind)?, parse_id(item_id)?);
            json_ok(&app.accounts.remove_item_from_shortlist(parse_id(id)?, item)?)
        }

        // Saved searches
        ("GET", ["api", "saved-searches"]) => {
            let views: Vec<SavedSearchView> = app
                .accounts
                .list_saved_searches()?
                .into_iter()
                .map(SavedSearchView::from)
                .collect();
            json_ok(&views)
        }
        ("POST", ["api", "saved-searches"]) => {
            let new: NewSavedSearch = read_json(&mut req)?;
            let created = app.accounts.create_saved_search(new)?;
            json_response(201, &SavedSearchView::from(created))
        }
        ("GET", ["api", "saved-searches", id]) => {
            let found = app.accounts.get_saved_search(parse_id(id)?)?;
            json_ok(&SavedSearchView::from(found))
        }
        ("PATCH", ["api", "saved-searches", id]) => {
            let id = parse_id(id)?;
            let update: SavedSearchUpdate = read_json(&mut req)?;
            let updated = app.accounts.update_saved_search(id, update)?;
            json_ok(&SavedSearchView::from(updated))
        }
        ("DELETE", ["api", "saved-searches", id]) => {
            app.accounts.delete_saved_search(parse_id(id)?)?;
            no_content()
        }
        ("GET", ["api", "saved-searches", id, "results"]) => {
            let saved = app.accounts.get_saved_search(parse_id(id)?)?;
            let sort = parse_sort(&query)?;
            json_ok(&app.listings.search(&saved.criteria, sort))
        }

        // Builders
        ("GET", ["api", "builders"]) => match query.get("region") {
            Some(region) if !region.trim().is_empty() => json_ok(&app.builders.by_region(region)),
            _ => json_ok(&app.builders.all()),
        },
        ("GET", ["api", "builders", id]) => json_ok(&app.builders.by_id(parse_id(id)?)?),
        ("POST", ["api", "enquiries"]) => {
            let enquiry: BuildEnquiry = read_json(&mut req)?;
            json_response(201, &app.builders.submit_enquiry(enquiry)?)
        }

        _ => Err(ServerError::not_found("Route")),
    }
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn read_json<T: DeserializeOwned>(req: &mut Request) -> Result<T, ServerError> {
    serde_json::from_reader(req.body_mut().reader())
        .map_err(|e| ServerError::BadRequest(format!("invalid JSON body: {e}")))
}

fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse()
        .map_err(|_| ServerError::BadRequest(format!("invalid id '{raw}'")))
}

fn required_id(query: &HashMap<String, String>, key: &str) -> Result<i64, ServerError> {
    let raw = query
        .get(key)
        .ok_or_else(|| ServerError::BadRequest(format!("missing {key}")))?;
    parse_id(raw)
}

fn parse_kind(raw: &str) -> Result<ListingKind, ServerError> {
    raw.parse().map_err(ServerError::BadRequest)
}

fn parse_sort(query: &HashMap<String, String>) -> Result<SortKey, ServerError> {
    query
        .get("sort")
        .map(|s| s.parse().map_err(ServerError::BadRequest))
        .transpose()
        .map(Option::unwrap_or_default)
}
