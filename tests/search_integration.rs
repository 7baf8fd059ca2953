use mockito::{Matcher, Server};
use rinth::client::ApiClient;
use rinth::facet::{Facet, FacetGroup};
use rinth::search::SortIndex;
use serde_json::json;

fn hit(id: &str, slug: &str) -> serde_json::Value {
    json!({
        "slug": slug,
        "title": slug,
        "description": "A test project.",
        "categories": ["utility"],
        "client_side": "required",
        "server_side": "optional",
        "project_type": "mod",
        "downloads": 100,
        "follows": 10,
        "icon_url": null,
        "project_id": id,
        "author": "tester",
        "versions": ["1.20.1"],
        "date_created": "2023-06-01T10:00:00+00:00",
        "date_modified": "2024-02-01T10:00:00+00:00",
        "latest_version": null,
        "license": "MIT",
        "gallery": []
    })
}

#[test]
fn test_full_search_walk_and_lazy_project_resolution() {
    let mut server = Server::new();
    let _page0 = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "lithium".into()),
            Matcher::UrlEncoded("index".into(), "relevance".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "hits": [hit("gvQqBUqZ", "lithium"), hit("hEOCdOgW", "phosphor")],
                "offset": 0,
                "limit": 2,
                "total_hits": 3
            })
            .to_string(),
        )
        .expect(1)
        .create();
    let _page1 = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("offset".into(), "2".into()))
        .with_status(200)
        .with_body(
            json!({
                "hits": [hit("P7dR8mSH", "fabric-api")],
                "offset": 2,
                "limit": 2,
                "total_hits": 3
            })
            .to_string(),
        )
        .expect(1)
        .create();
    let _project = server
        .mock("GET", "/project/gvQqBUqZ")
        .with_status(200)
        .with_body(
            json!({
                "id": "gvQqBUqZ",
                "slug": "lithium",
                "title": "Lithium",
                "description": "No-compromises game logic optimization.",
                "body": "...",
                "categories": ["optimization"],
                "client_side": "optional",
                "server_side": "optional",
                "status": "approved",
                "project_type": "mod",
                "downloads": 30000000,
                "followers": 12000,
                "icon_url": null,
                "team": "peSx5UYg",
                "published": "2021-01-03T00:56:52+00:00",
                "updated": "2024-04-30T11:02:00+00:00",
                "license": {"id": "LGPL-3.0-only", "name": "LGPL v3", "url": null},
                "versions": [],
                "game_versions": [],
                "loaders": [],
                "gallery": [],
                "donation_urls": []
            })
            .to_string(),
        )
        .expect(1)
        .create();

    let client = ApiClient::new().with_base_url(server.url());
    let mut search = client
        .search()
        .with_query("lithium")
        .with_page_size(2)
        .with_sort(SortIndex::Relevance);

    let slugs: Vec<String> = search.results().map(|result| result.slug).collect();
    assert_eq!(slugs, vec!["lithium", "phosphor", "fabric-api"]);
    assert_eq!(search.total_hits(), Some(3));

    // Walking again is served from cache: the expect(1) mocks above hold.
    assert_eq!(search.results().count(), 3);

    // A hit resolves its parent project lazily, by id, through the client.
    let first = search.page(0).results().unwrap()[0].clone();
    let project = first.project(&client).unwrap().unwrap();
    assert_eq!(project.slug, "lithium");
    assert_eq!(project.id, first.project_id);
}

#[test]
fn test_search_records_rate_limit() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("x-ratelimit-limit", "300")
        .with_header("x-ratelimit-remaining", "298")
        .with_header("x-ratelimit-reset", "12")
        .with_body(
            json!({"hits": [], "offset": 0, "limit": 10, "total_hits": 0}).to_string(),
        )
        .create();

    let client = ApiClient::new().with_base_url(server.url());
    let mut search = client.search().with_query("anything");
    search.page(0);

    assert_eq!(client.rate_limit().unwrap().remaining, 298);
}

#[test]
fn test_facets_reach_the_wire_in_declared_order() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded(
            "facets".into(),
            r#"[["project_type:mod"],["versions:1.20.1","versions:1.20.4"]]"#.into(),
        ))
        .with_status(200)
        .with_body(
            json!({"hits": [], "offset": 0, "limit": 10, "total_hits": 0}).to_string(),
        )
        .expect(1)
        .create();

    let client = ApiClient::new().with_base_url(server.url());
    let facets = FacetGroup::new()
        .and_single(Facet::project_type("mod").unwrap())
        .and(Facet::versions(["1.20.1", "1.20.4"]).unwrap());

    let mut search = client.search().with_facets(facets);
    search.page(0);
    mock.assert();
}
