use app::store::Store;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::{Client, LocalResponse};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn client(dir: &TempDir) -> Client {
    let store = Store::new(users_path(dir), dir.path().join("donations.json"));
    Client::tracked(api::register(rocket::build(), store)).unwrap()
}

fn users_path(dir: &TempDir) -> PathBuf {
    dir.path().join("users.json")
}

fn register(client: &Client, username: &str, password: &str) -> Status {
    client
        .post("/register")
        .header(ContentType::Form)
        .body(format!("username={}&password={}", username, password))
        .dispatch()
        .status()
}

fn donate<'c>(client: &'c Client, amount: &str) -> LocalResponse<'c> {
    client
        .post("/donate")
        .header(ContentType::Form)
        .body(format!("amount={}", amount))
        .dispatch()
}

fn promote<'c>(client: &'c Client, username: &str) -> LocalResponse<'c> {
    client
        .post("/make-user-admin")
        .header(ContentType::JSON)
        .body(format!(r#"{{"user": "{}"}}"#, username))
        .dispatch()
}

fn body_json(response: LocalResponse<'_>) -> Value {
    response.into_json().unwrap()
}

/// Moves a registered user into the admin partition by editing the users
/// file, the same way the first admin of a deployment is created.
fn make_admin_on_disk(dir: &TempDir, username: &str) {
    let mut doc: Value = serde_json::from_slice(&fs::read(users_path(dir)).unwrap()).unwrap();
    let stored = doc.as_object_mut().unwrap().remove(username).unwrap();
    doc["admin"][username] = stored;
    fs::write(users_path(dir), serde_json::to_vec_pretty(&doc).unwrap()).unwrap();
}

#[test]
fn index_reports_the_session() {
    let dir = TempDir::new().unwrap();
    let client = client(&dir);

    let anonymous = body_json(client.get("/").dispatch());
    assert_eq!(anonymous["user"], Value::Null);

    assert_eq!(register(&client, "alice", "wonderland"), Status::SeeOther);
    let logged_in = body_json(client.get("/").dispatch());
    assert_eq!(logged_in["user"]["username"], "alice");
    assert_eq!(logged_in["user"]["role"], "REGULAR");
}

#[test]
fn registration_validates_the_form() {
    let dir = TempDir::new().unwrap();
    let client = client(&dir);

    let response = client
        .post("/register")
        .header(ContentType::Form)
        .body("username=abc&password=longenough")
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(body_json(response)["error"]["kind"], "USERNAME_TOO_SHORT");

    let response = client
        .post("/register")
        .header(ContentType::Form)
        .body("username=alice&password=short")
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(body_json(response)["error"]["kind"], "PASSWORD_TOO_SHORT");

    let response = client
        .post("/register")
        .header(ContentType::Form)
        .body("password=longenough")
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(body_json(response)["error"]["kind"], "MISSING_USERNAME");
}

#[test]
fn duplicate_registration_is_rejected() {
    let dir = TempDir::new().unwrap();
    let client = client(&dir);
    assert_eq!(register(&client, "alice", "wonderland"), Status::SeeOther);
    let before = fs::read(users_path(&dir)).unwrap();

    let response = client
        .post("/register")
        .header(ContentType::Form)
        .body("username=alice&password=different")
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(body_json(response)["error"]["kind"], "DUPLICATE_USER");
    assert_eq!(fs::read(users_path(&dir)).unwrap(), before);
}

#[test]
fn login_round_trip() {
    let dir = TempDir::new().unwrap();
    let client = client(&dir);
    assert_eq!(register(&client, "alice", "wonderland"), Status::SeeOther);
    assert_eq!(client.get("/logout").dispatch().status(), Status::SeeOther);
    assert_eq!(
        client.get("/your-donations").dispatch().status(),
        Status::Unauthorized
    );

    let response = client
        .post("/login")
        .header(ContentType::Form)
        .body("username=alice&password=wrong-password")
        .dispatch();
    assert_eq!(response.status(), Status::Forbidden);
    assert_eq!(body_json(response)["error"]["kind"], "INVALID_CREDENTIALS");

    let response = client
        .post("/login")
        .header(ContentType::Form)
        .body("username=alice&password=wonderland")
        .dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(
        client.get("/your-donations").dispatch().status(),
        Status::Ok
    );
}

#[test]
fn donations_accumulate_for_the_logged_in_user() {
    let dir = TempDir::new().unwrap();
    let client = client(&dir);
    assert_eq!(register(&client, "alice", "wonderland"), Status::SeeOther);

    let response = donate(&client, "10.5");
    assert_eq!(response.status(), Status::Ok);
    let body = body_json(response);
    assert_eq!(body["donation"]["amount"], 10.5);
    assert_eq!(
        body["message"],
        "You have made a donation of 10.50. Thank you."
    );

    assert_eq!(donate(&client, "4.25").status(), Status::Ok);
    assert_eq!(donate(&client, "5").status(), Status::Ok);

    let listed = body_json(client.get("/your-donations").dispatch());
    assert_eq!(listed["donations"].as_array().unwrap().len(), 3);
    assert_eq!(listed["total"], 19.75);
}

#[test]
fn non_positive_donations_are_rejected() {
    let dir = TempDir::new().unwrap();
    let client = client(&dir);
    assert_eq!(register(&client, "alice", "wonderland"), Status::SeeOther);

    let response = donate(&client, "-3");
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(body_json(response)["error"]["kind"], "AMOUNT_NOT_POSITIVE");

    let response = donate(&client, "0");
    assert_eq!(response.status(), Status::BadRequest);

    let response = donate(&client, "lots");
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(body_json(response)["error"]["kind"], "INVALID_AMOUNT");

    let listed = body_json(client.get("/your-donations").dispatch());
    assert!(listed["donations"].as_array().unwrap().is_empty());
    assert_eq!(listed["total"], 0.0);
}

#[test]
fn donating_requires_a_session() {
    let dir = TempDir::new().unwrap();
    let client = client(&dir);
    assert_eq!(donate(&client, "10").status(), Status::Unauthorized);
}

#[test]
fn non_admins_are_logged_out_of_admin_views() {
    let dir = TempDir::new().unwrap();
    let client = client(&dir);
    assert_eq!(register(&client, "alice", "wonderland"), Status::SeeOther);

    let response = client.get("/view-all-users").dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/"));

    // The session was terminated on the way out.
    assert_eq!(
        client.get("/your-donations").dispatch().status(),
        Status::Unauthorized
    );
}

#[test]
fn admins_see_the_aggregate_view() {
    let dir = TempDir::new().unwrap();
    let client = client(&dir);
    assert_eq!(register(&client, "alice", "wonderland"), Status::SeeOther);
    assert_eq!(donate(&client, "10").status(), Status::Ok);
    assert_eq!(donate(&client, "2.5").status(), Status::Ok);

    assert_eq!(register(&client, "root", "rootpassword"), Status::SeeOther);
    make_admin_on_disk(&dir, "root");
    assert_eq!(donate(&client, "1.25").status(), Status::Ok);

    let body = body_json(client.get("/view-all-users").dispatch());
    assert_eq!(body["total"], 13.75);
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);

    let alice = users.iter().find(|u| u["username"] == "alice").unwrap();
    assert_eq!(alice["role"], "REGULAR");
    assert_eq!(alice["total"], 12.5);
    assert_eq!(alice["count"], 2);

    let root = users.iter().find(|u| u["username"] == "root").unwrap();
    assert_eq!(root["role"], "ADMIN");
    assert_eq!(root["total"], 1.25);
    assert_eq!(root["count"], 1);
}

#[test]
fn promotion_moves_users_into_the_admin_partition() {
    let dir = TempDir::new().unwrap();
    let client = client(&dir);
    assert_eq!(register(&client, "alice", "wonderland"), Status::SeeOther);
    assert_eq!(register(&client, "root", "rootpassword"), Status::SeeOther);
    make_admin_on_disk(&dir, "root");

    let response = promote(&client, "alice");
    assert_eq!(response.status(), Status::Ok);
    let body = body_json(response);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["role"], "ADMIN");

    let doc: Value = serde_json::from_slice(&fs::read(users_path(&dir)).unwrap()).unwrap();
    assert!(doc.as_object().unwrap().get("alice").is_none());
    assert!(doc["admin"]["alice"].is_string());

    let response = promote(&client, "alice");
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(body_json(response)["error"]["kind"], "ALREADY_ADMIN");

    let response = promote(&client, "ghost");
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(body_json(response)["error"]["kind"], "UNKNOWN_USER");
}

#[test]
fn promotion_requires_an_admin_session() {
    let dir = TempDir::new().unwrap();
    let client = client(&dir);
    assert_eq!(promote(&client, "alice").status(), Status::Unauthorized);

    assert_eq!(register(&client, "bobby", "tables-pw"), Status::SeeOther);
    let response = promote(&client, "bobby");
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/"));
    assert_eq!(
        client.get("/your-donations").dispatch().status(),
        Status::Unauthorized
    );
}
