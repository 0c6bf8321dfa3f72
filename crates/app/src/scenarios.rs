//! Objects API scenarios.
//!
//! Every scenario uses URLs relative to the configured base URL and the
//! object id captured from its own create step.

use probe_application::ports::HttpClient;
use probe_application::{ScenarioContext, StepResult};
use probe_domain::{Spec, spec};
use serde_json::{Value, json};

/// Id that never exists on the Objects API.
pub const UNKNOWN_ID: &str = "999999";

/// Name of the object every create step sends.
pub const PAYLOAD_NAME: &str = "Apple MacBook Pro 16";

/// Name the patch scenario renames the object to.
pub const PATCHED_NAME: &str = "Apple MacBook Pro 16 (Updated Name)";

/// The object sent by every create step.
#[must_use]
pub fn macbook_payload() -> Value {
    json!({
        "name": PAYLOAD_NAME,
        "data": {
            "year": 2019,
            "price": 1849.99,
            "CPU model": "Intel Core i9",
            "Hard disk size": "1 TB"
        }
    })
}

/// The full replacement sent by the update scenario.
#[must_use]
pub fn macbook_update() -> Value {
    json!({
        "name": PAYLOAD_NAME,
        "data": {
            "year": 2019,
            "price": 2049.99,
            "CPU model": "Intel Core i9",
            "Hard disk size": "1 TB",
            "color": "silver"
        }
    })
}

fn create_object() -> StepResult<Spec> {
    Ok(spec()
        .post("/objects")
        .with_json(macbook_payload())
        .expect_status(200)
        .returns("id")
        .build()?)
}

/// `GET /objects` answers 200.
pub async fn list_objects<C: HttpClient>(ctx: &mut ScenarioContext<C>) -> StepResult<()> {
    let list = spec().get("/objects").expect_status(200).build()?;
    ctx.run(&list).await?;
    Ok(())
}

/// `GET /objects/{unknown}` answers 404.
pub async fn get_unknown_object<C: HttpClient>(ctx: &mut ScenarioContext<C>) -> StepResult<()> {
    let get = spec()
        .get(format!("/objects/{UNKNOWN_ID}"))
        .expect_status(404)
        .build()?;
    ctx.run(&get).await?;
    Ok(())
}

/// A created object can be fetched by its id.
pub async fn create_then_get<C: HttpClient>(ctx: &mut ScenarioContext<C>) -> StepResult<()> {
    ctx.capture("id", &create_object()?).await?;

    let get = spec()
        .get("/objects/{{id}}")
        .expect_status(200)
        .expect_json_like(json!({
            "id": "{{id}}",
            "name": PAYLOAD_NAME,
            "data": macbook_payload()["data"]
        }))
        .build()?;
    ctx.run(&get).await?;
    Ok(())
}

/// Creating an object echoes the submitted name and data.
pub async fn create_returns_data<C: HttpClient>(ctx: &mut ScenarioContext<C>) -> StepResult<()> {
    let payload = macbook_payload();
    let create = spec()
        .post("/objects")
        .with_json(payload.clone())
        .expect_status(200)
        .expect_json_like(json!({"name": payload["name"], "data": payload["data"]}))
        .build()?;
    ctx.run(&create).await?;
    Ok(())
}

/// `POST /objects` without a body answers 400.
pub async fn create_without_body<C: HttpClient>(ctx: &mut ScenarioContext<C>) -> StepResult<()> {
    let create = spec().post("/objects").expect_status(400).build()?;
    ctx.run(&create).await?;
    Ok(())
}

/// `PUT` replaces an existing object and echoes the new data.
pub async fn update_object<C: HttpClient>(ctx: &mut ScenarioContext<C>) -> StepResult<()> {
    ctx.capture("id", &create_object()?).await?;

    let update = spec()
        .put("/objects/{{id}}")
        .with_json(macbook_update())
        .expect_status(200)
        .expect_json_like(json!({
            "name": PAYLOAD_NAME,
            "data": {"price": 2049.99, "color": "silver"}
        }))
        .build()?;
    ctx.run(&update).await?;
    Ok(())
}

/// `PUT /objects/{unknown}` answers 404.
pub async fn update_unknown_object<C: HttpClient>(
    ctx: &mut ScenarioContext<C>,
) -> StepResult<()> {
    let update = spec()
        .put(format!("/objects/{UNKNOWN_ID}"))
        .with_json(json!({"name": "Objeto Inexistente", "data": {"year": 2025}}))
        .expect_status(404)
        .build()?;
    ctx.run(&update).await?;
    Ok(())
}

/// `PATCH` changes only the name, and a later `GET` sees it next to the
/// untouched data.
pub async fn patch_then_get<C: HttpClient>(ctx: &mut ScenarioContext<C>) -> StepResult<()> {
    ctx.capture("id", &create_object()?).await?;

    let patch = spec()
        .patch("/objects/{{id}}")
        .with_json(json!({"name": PATCHED_NAME}))
        .expect_status(200)
        .expect_json_like(json!({"id": "{{id}}", "name": PATCHED_NAME}))
        .build()?;
    ctx.run(&patch).await?;

    let get = spec()
        .get("/objects/{{id}}")
        .expect_status(200)
        .expect_json_like(json!({
            "id": "{{id}}",
            "name": PATCHED_NAME,
            "data": macbook_payload()["data"]
        }))
        .build()?;
    ctx.run(&get).await?;
    Ok(())
}

/// `PATCH /objects/{unknown}` answers 404.
pub async fn patch_unknown_object<C: HttpClient>(ctx: &mut ScenarioContext<C>) -> StepResult<()> {
    let patch = spec()
        .patch(format!("/objects/{UNKNOWN_ID}"))
        .with_json(json!({"name": "Qualquer Nome"}))
        .expect_status(404)
        .build()?;
    ctx.run(&patch).await?;
    Ok(())
}

/// A created object can be fetched until it is deleted.
pub async fn delete_then_get<C: HttpClient>(ctx: &mut ScenarioContext<C>) -> StepResult<()> {
    ctx.capture("id", &create_object()?).await?;

    let get = spec()
        .get("/objects/{{id}}")
        .expect_status(200)
        .expect_json_like(json!({"id": "{{id}}", "name": PAYLOAD_NAME}))
        .build()?;
    ctx.run(&get).await?;

    let delete = spec()
        .delete("/objects/{{id}}")
        .expect_status(200)
        .expect_body_contains("has been deleted")
        .build()?;
    ctx.run(&delete).await?;

    let gone = spec().get("/objects/{{id}}").expect_status(404).build()?;
    ctx.run(&gone).await?;
    Ok(())
}

/// `DELETE /objects/{unknown}` answers 404.
pub async fn delete_unknown_object<C: HttpClient>(
    ctx: &mut ScenarioContext<C>,
) -> StepResult<()> {
    let delete = spec()
        .delete(format!("/objects/{UNKNOWN_ID}"))
        .expect_status(404)
        .build()?;
    ctx.run(&delete).await?;
    Ok(())
}
