use ingredient_vision::clients::ApiTransport;
use ingredient_vision::messages;
use ingredient_vision::{
    AppView, Event, ImageFile, RecipeSearchClient, Stage, UploadDetectClient, UploadPolicy,
    Workflow,
};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

fn workflow(server: &ServerGuard) -> Workflow<UploadDetectClient, RecipeSearchClient> {
    let transport = ApiTransport::new(server.url(), None).unwrap();
    Workflow::new(
        UploadDetectClient::new(transport.clone()),
        RecipeSearchClient::new(transport),
        UploadPolicy::default(),
    )
}

fn photo(name: &str) -> ImageFile {
    ImageFile::new(name, "image/jpeg", b"not really a jpeg".to_vec())
}

async fn mock_upload(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/upload-image")
        .match_body(Matcher::Regex(r#"name="image""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "image_id": "uploads/steak_taco.jpg",
                "status": "uploaded",
                "url": "https://bucket.example/uploads/steak_taco.jpg"
            })
            .to_string(),
        )
        .create_async()
        .await
}

async fn mock_detect(server: &mut ServerGuard, ingredients: &[&str]) -> Mock {
    server
        .mock("POST", "/analyze")
        .match_body(Matcher::Json(json!({ "s3_key": "uploads/steak_taco.jpg" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "ingredients_raw": ingredients,
                "ingredients_normalized": ingredients
            })
            .to_string(),
        )
        .create_async()
        .await
}

#[tokio::test]
async fn test_steak_taco_journey() {
    let _ = env_logger::try_init();
    let mut server = Server::new_async().await;
    let upload = mock_upload(&mut server).await;
    let detect = mock_detect(&mut server, &["steak", "tortilla", "onion"]).await;
    let search = server
        .mock("POST", "/recipes")
        .match_body(Matcher::Json(json!({
            "ingredients": ["steak", "tortilla", "onion"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "recipes": [{
                    "id": 42,
                    "title": "Steak Tacos",
                    "image": "https://img.example/tacos.jpg",
                    "score": 0.91,
                    "matched": ["steak"],
                    "missing": ["cilantro"],
                    "source": "spoonacular"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut workflow = workflow(&server);

    let state = workflow
        .dispatch(Event::ImageSelected(photo("steak_taco.jpg")))
        .await;
    assert_eq!(state.stage(), Stage::Ingredients);
    assert_eq!(
        state.ingredients().as_slice(),
        &["steak", "tortilla", "onion"]
    );
    assert_eq!(
        state.session().remote_image_id(),
        Some("uploads/steak_taco.jpg")
    );

    let state = workflow.dispatch(Event::Confirm).await;
    assert_eq!(state.stage(), Stage::Recipes);

    let view = AppView::from_state(state, None);
    assert_eq!(view.cards.len(), 1);
    assert_eq!(view.cards[0].title, "Steak Tacos");
    assert_eq!(view.cards[0].matched_count, 1);
    assert_eq!(view.cards[0].missing_count, 1);
    assert_eq!(view.cards[0].match_percentage, Some(50));

    upload.assert_async().await;
    detect.assert_async().await;
    search.assert_async().await;
}

#[tokio::test]
async fn test_text_file_never_reaches_the_network() {
    let mut server = Server::new_async().await;
    let upload = server
        .mock("POST", "/upload-image")
        .expect(0)
        .create_async()
        .await;

    let mut workflow = workflow(&server);
    let notes = ImageFile::new("notes.txt", "text/plain", b"shopping list".to_vec());
    let state = workflow.dispatch(Event::ImageSelected(notes)).await;

    assert_eq!(state.stage(), Stage::Upload);
    assert!(state.notice().unwrap().contains("valid image file"));
    upload.assert_async().await;
}

#[tokio::test]
async fn test_empty_detection_disables_confirm() {
    let mut server = Server::new_async().await;
    let _upload = mock_upload(&mut server).await;
    let _detect = mock_detect(&mut server, &[]).await;
    let search = server.mock("POST", "/recipes").expect(0).create_async().await;

    let mut workflow = workflow(&server);
    workflow
        .dispatch(Event::ImageSelected(photo("empty_fridge.jpg")))
        .await;
    let state = workflow.dispatch(Event::Confirm).await;

    assert_eq!(state.stage(), Stage::Ingredients);
    let view = AppView::from_state(state, None);
    assert!(!view.confirm_enabled);
    assert_eq!(view.ingredients_message, Some(messages::NO_INGREDIENTS));
    search.assert_async().await;
}

#[tokio::test]
async fn test_search_bad_gateway_then_dismiss() {
    let mut server = Server::new_async().await;
    let _upload = mock_upload(&mut server).await;
    let _detect = mock_detect(&mut server, &["steak"]).await;
    let _search = server
        .mock("POST", "/recipes")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let mut workflow = workflow(&server);
    workflow
        .dispatch(Event::ImageSelected(photo("steak_taco.jpg")))
        .await;
    let state = workflow.dispatch(Event::Confirm).await;

    assert_eq!(state.stage(), Stage::Error);
    assert_eq!(state.error().unwrap().message, messages::RECIPES_ERROR);

    let state = workflow.dispatch(Event::DismissError).await;
    assert_eq!(state.stage(), Stage::Upload);
    assert!(state.ingredients().is_empty());
    assert!(state.session().image().is_none());
}

#[tokio::test]
async fn test_upload_error_surfaces_server_detail() {
    let mut server = Server::new_async().await;
    let _upload = server
        .mock("POST", "/upload-image")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(json!({ "detail": "Image too blurry" }).to_string())
        .create_async()
        .await;
    let detect = server.mock("POST", "/analyze").expect(0).create_async().await;

    let mut workflow = workflow(&server);
    let state = workflow
        .dispatch(Event::ImageSelected(photo("blurry.jpg")))
        .await;

    assert_eq!(state.stage(), Stage::Error);
    assert_eq!(state.error().unwrap().message, "Image too blurry");
    detect.assert_async().await;
}

#[tokio::test]
async fn test_detail_is_merged_into_the_summary() {
    let mut server = Server::new_async().await;
    let _upload = mock_upload(&mut server).await;
    let _detect = mock_detect(&mut server, &["steak", "tortilla"]).await;
    let _search = server
        .mock("POST", "/recipes")
        .with_status(200)
        .with_body(
            json!({
                "recipes": [{
                    "id": 42,
                    "title": "Steak Tacos",
                    "score": 0.91,
                    "matched": ["steak", "tortilla"],
                    "missing": ["cilantro"],
                    "source": "spoonacular"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/recipes/42")
        .with_status(200)
        .with_body(
            json!({
                "id": 42,
                "readyInMinutes": 25,
                "servings": 4,
                "sourceUrl": "https://example.com/steak-tacos",
                "analyzedInstructions": [{
                    "name": "",
                    "steps": [
                        { "number": 1, "step": "Grill the steak." },
                        { "number": 2, "step": "Warm the tortillas." }
                    ]
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut workflow = workflow(&server);
    workflow
        .dispatch(Event::ImageSelected(photo("steak_taco.jpg")))
        .await;
    workflow.dispatch(Event::Confirm).await;
    let state = workflow.dispatch(Event::SelectRecipe(0)).await;

    let view = AppView::from_state(state, None);
    let selected = view.selected.unwrap();
    assert!(!selected.loading);
    assert_eq!(selected.title, "Steak Tacos");
    assert_eq!(selected.matched, vec!["steak", "tortilla"]);
    assert_eq!(selected.missing, vec!["cilantro"]);
    assert_eq!(selected.ready_in_minutes, Some(25));
    assert_eq!(selected.servings, Some(4));
    assert_eq!(
        selected.steps,
        vec!["Grill the steak.", "Warm the tortillas."]
    );
    detail.assert_async().await;
}

#[tokio::test]
async fn test_detail_failure_keeps_recipes() {
    let mut server = Server::new_async().await;
    let _upload = mock_upload(&mut server).await;
    let _detect = mock_detect(&mut server, &["steak"]).await;
    let _search = server
        .mock("POST", "/recipes")
        .with_status(200)
        .with_body(
            json!({
                "recipes": [
                    { "id": 7, "title": "Carne Asada", "score": 0.8, "matched": ["steak"], "missing": [], "source": "local" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _detail = server
        .mock("GET", "/recipes/7")
        .with_status(404)
        .with_body(json!({ "detail": "Recipe not found" }).to_string())
        .create_async()
        .await;

    let mut workflow = workflow(&server);
    workflow
        .dispatch(Event::ImageSelected(photo("steak_taco.jpg")))
        .await;
    workflow.dispatch(Event::Confirm).await;
    let state = workflow.dispatch(Event::SelectRecipe(0)).await;

    assert_eq!(state.stage(), Stage::Recipes);
    assert!(state.error().is_none());
    assert_eq!(state.recipes().len(), 1);
    let selection = state.selection().unwrap();
    assert!(!selection.loading);
    assert_eq!(selection.recipe_id, Some(7));
}

#[tokio::test]
async fn test_start_over_clears_everything() {
    let mut server = Server::new_async().await;
    let _upload = mock_upload(&mut server).await;
    let _detect = mock_detect(&mut server, &["steak"]).await;

    let mut workflow = workflow(&server);
    workflow
        .dispatch(Event::ImageSelected(photo("steak_taco.jpg")))
        .await;
    workflow
        .dispatch(Event::SetCuisine(Some("mexican".to_string())))
        .await;
    let before = workflow.state().version();

    let state = workflow.dispatch(Event::StartOver).await;
    assert_eq!(state.stage(), Stage::Upload);
    assert!(state.ingredients().is_empty());
    assert!(state.filters().cuisine.is_none());
    assert!(state.session().remote_image_id().is_none());
    assert!(state.version() > before);
}
