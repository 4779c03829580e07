use std::net::SocketAddr;

use models::fixtures::SeedData;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::{AppServices, ServiceOptions};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::startup::build_app;
use server::AppState;

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Fresh collections per test, no simulated latency.
async fn start_server() -> anyhow::Result<TestApp> {
    let services = AppServices::from_seed(SeedData::embedded()?, ServiceOptions::default());
    let app = build_app(AppState::new(services));
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_client_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let email = format!("ops_{}@acme.test", Uuid::new_v4().simple());

    let res = c
        .post(app.url("/api/clients"))
        .json(&json!({"companyName": "Acme", "contactName": "Ana", "email": email}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created["Id"], 6);
    assert_eq!(created["status"], "active");
    assert_eq!(created["notes"], "");

    // same email, different case
    let res = c
        .post(app.url("/api/clients"))
        .json(&json!({"companyName": "Acme Two", "email": email.to_uppercase()}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Duplicate Email");

    // Id in the body is ignored
    let res = c
        .put(app.url("/api/clients/6"))
        .json(&json!({"Id": 99, "notes": "VIP"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["Id"], 6);
    assert_eq!(updated["notes"], "VIP");

    let res = c.delete(app.url("/api/clients/6")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["companyName"], "Acme");

    let res = c.get(app.url("/api/clients/6")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Client not found");
    Ok(())
}

#[tokio::test]
async fn e2e_client_validation_and_paging() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(app.url("/api/clients"))
        .json(&json!({"companyName": "  ", "email": "x@y.z"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Validation Error");

    let page = c.get(app.url("/api/clients?page=2&per_page=2")).send().await?.json::<Value>().await?;
    assert_eq!(page["total"], 5);
    assert_eq!(page["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(page["items"][0]["Id"], 3);

    let found = c.get(app.url("/api/clients?q=dental")).send().await?.json::<Value>().await?;
    assert_eq!(found["total"], 1);
    assert_eq!(found["items"][0]["Id"], 2);
    Ok(())
}

#[tokio::test]
async fn e2e_catalog_filters() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let all = c.get(app.url("/api/services")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(all.len(), 7);

    let hosting = c
        .get(app.url("/api/services?category=webHosting&active_only=true"))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(hosting.len(), 2);

    let res = c
        .post(app.url("/api/services"))
        .json(&json!({"name": "Backups", "category": "webHosting", "price": -1, "billingCycle": "monthly"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_ticket_thread() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let thread = c.get(app.url("/api/tickets/5/messages")).send().await?.json::<Vec<Value>>().await?;
    let ids: Vec<_> = thread.iter().map(|m| m["Id"].clone()).collect();
    assert_eq!(ids, vec![json!(7), json!(8), json!(6)]);

    let res = c
        .post(app.url("/api/tickets/5/messages"))
        .json(&json!({"message": "Deployed to production."}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created["ticketId"], 5);
    assert_eq!(created["authorType"], "support");

    let detail = c.get(app.url("/api/tickets/5/detail")).send().await?.json::<Value>().await?;
    assert_eq!(detail["messages"].as_array().map(Vec::len), Some(4));
    assert_eq!(detail["client"]["Id"], 5);

    let res = c.post(app.url("/api/tickets/99/messages")).json(&json!({"message": "hi"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_ticket_queries() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let open = c.get(app.url("/api/tickets/open")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(open.len(), 4);

    let urgent = c
        .get(app.url("/api/tickets?status=inProgress&priority=urgent"))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(urgent.len(), 1);
    assert_eq!(urgent[0]["Id"], 3);

    let stats = c.get(app.url("/api/tickets/stats")).send().await?.json::<Value>().await?;
    assert_eq!(stats["open"], 2);
    assert_eq!(stats["closed"], 2);

    let res = c
        .put(app.url("/api/tickets/1"))
        .json(&json!({"status": "resolved"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["status"], "resolved");
    Ok(())
}

#[tokio::test]
async fn e2e_read_models() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let dashboard = c.get(app.url("/api/dashboard")).send().await?.json::<Value>().await?;
    assert_eq!(dashboard["activeClients"], 4);
    assert_eq!(dashboard["openTickets"], 4);
    assert_eq!(dashboard["recentActivity"].as_array().map(Vec::len), Some(5));

    let detail = c.get(app.url("/api/clients/1/detail")).send().await?.json::<Value>().await?;
    assert_eq!(detail["assignments"][0]["serviceName"], "Hosting Web Básico");

    let portal = c.get(app.url("/api/portal/2")).send().await?.json::<Value>().await?;
    assert_eq!(portal["companyName"], "Clínica Dental Sonrisa");
    assert_eq!(portal["stats"]["activeServices"], 1);

    let res = c.get(app.url("/api/portal/404")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_exposed() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    c.get(app.url("/health")).send().await?;
    let body = c.get(app.url("/metrics")).send().await?.text().await?;
    assert!(body.contains("client_hub_requests_total"));
    Ok(())
}
