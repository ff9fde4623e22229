mod common;

use serde_json::{json, Value};

async fn create_category(app: &common::TestApp, name: &str) -> i64 {
    let response = app.post_json("/categories", &json!({ "name": name })).await;
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    body["id"].as_i64().unwrap()
}

fn phone(category_id: i64) -> Value {
    json!({
        "name": "Phone",
        "description": "Good phone",
        "price": 800.0,
        "imgUrl": "https://img.com/img.png",
        "date": "2020-10-20T03:00:00Z",
        "categories": [{ "id": category_id }]
    })
}

#[tokio::test]
async fn insert_get_delete_flow() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    create_category(&app, "Books").await;
    let electronics = create_category(&app, "Electronics").await;

    let response = app.post_json("/products", &phone(electronics)).await;
    assert_eq!(response.status().as_u16(), 201);
    let location = response
        .headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let created: Value = response.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["price"], 800.0);
    assert!(location.ends_with(&format!("/products/{}", id)));

    let fetched: Value = app
        .get(&format!("/products/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched["categories"][0]["name"], "Electronics");

    let response = app.delete(&format!("/products/{}", id)).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.get(&format!("/products/{}", id)).await;
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["path"], format!("/products/{}", id));
}

#[tokio::test]
async fn update_replaces_categories() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let books = create_category(&app, "Books").await;
    let computers = create_category(&app, "Computers").await;
    let created: Value = app
        .post_json("/products", &phone(books))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let mut payload = phone(computers);
    payload["name"] = json!("Macbook Pro");
    payload["price"] = json!(1250.0);
    let response = app.put_json(&format!("/products/{}", id), &payload).await;

    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["name"], "Macbook Pro");
    assert_eq!(
        updated["categories"],
        json!([{ "id": computers, "name": "Computers" }])
    );

    let links: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM tb_product_category WHERE product_id = $1")
            .bind(id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(links, 1);
}

#[tokio::test]
async fn sub_microsecond_date_matches_stored_value() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let books = create_category(&app, "Books").await;
    let mut payload = phone(books);
    payload["date"] = json!("2020-10-20T03:00:00.123456789Z");

    let created: Value = app
        .post_json("/products", &payload)
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();
    let fetched: Value = app
        .get(&format!("/products/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(created["date"], fetched["date"]);

    let updated: Value = app
        .put_json(&format!("/products/{}", id), &payload)
        .await
        .json()
        .await
        .unwrap();
    let fetched: Value = app
        .get(&format!("/products/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(updated["date"], fetched["date"]);
}

#[tokio::test]
async fn update_missing_product_writes_nothing() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let books = create_category(&app, "Books").await;

    let response = app.put_json("/products/1000", &phone(books)).await;

    assert_eq!(response.status().as_u16(), 404);
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tb_product")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn deleting_referenced_category_is_rejected() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let books = create_category(&app, "Books").await;
    let response = app.post_json("/products", &phone(books)).await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app.delete(&format!("/categories/{}", books)).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Database exception");
    let response = app.get(&format!("/categories/{}", books)).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn pages_are_sorted_by_requested_property() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let books = create_category(&app, "Books").await;
    for (name, price) in [("Smart TV", 2190.0), ("Macbook Pro", 1250.0), ("Phone", 800.0)] {
        let mut payload = phone(books);
        payload["name"] = json!(name);
        payload["price"] = json!(price);
        app.post_json("/products", &payload).await;
    }

    let page: Value = app
        .get("/products?page=0&size=2&sort=price,asc")
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["content"][0]["name"], "Phone");
    assert_eq!(page["content"][1]["name"], "Macbook Pro");

    let response = app.get("/products?sort=color").await;
    assert_eq!(response.status().as_u16(), 422);
}
