use log::debug;
use std::collections::VecDeque;

use super::effect::Effect;
use super::event::Event;
use super::state::AppState;
use super::update::update;
use crate::clients::{Call, DetectionService, RecipeService};
use crate::upload::UploadPolicy;

/// Makes the call an effect asks for and reports the outcome as an event.
///
/// Front ends that run effects on their own tasks can call this directly and
/// feed the returned event back whenever it completes; a late result is
/// discarded by [`update`] if the journey has moved on.
pub async fn run_effect<D, R>(detection: &D, recipes: &R, effect: Effect) -> Event
where
    D: DetectionService + ?Sized,
    R: RecipeService + ?Sized,
{
    debug!("Running {:?}", effect);
    match effect {
        Effect::Upload { version, file } => match detection.upload(&file).await {
            Ok(response) => Event::Uploaded { version, response },
            Err(e) => failed(version, Call::Upload, e),
        },
        Effect::Detect { version, image_id } => match detection.detect(&image_id).await {
            Ok(detection) => Event::Detected { version, detection },
            Err(e) => failed(version, Call::Detect, e),
        },
        Effect::Search { version, request } => match recipes.search(&request).await {
            Ok(recipes) => Event::SearchCompleted { version, recipes },
            Err(e) => failed(version, Call::Search, e),
        },
        Effect::FetchDetail { version, recipe_id } => match recipes.get_detail(recipe_id).await {
            Ok(detail) => Event::DetailLoaded {
                version,
                recipe_id,
                detail,
            },
            Err(e) => Event::DetailFailed {
                version,
                recipe_id,
                message: e.to_string(),
            },
        },
    }
}

fn failed(version: u64, call: Call, error: crate::ClientError) -> Event {
    Event::Failed {
        version,
        call,
        message: error.to_string(),
    }
}

/// One user journey wired to its services.
///
/// Effects run one at a time, in the order they were emitted, so an upload
/// always completes before its detection is issued.
pub struct Workflow<D, R> {
    state: AppState,
    detection: D,
    recipes: R,
}

impl<D: DetectionService, R: RecipeService> Workflow<D, R> {
    pub fn new(detection: D, recipes: R, policy: UploadPolicy) -> Self {
        Self {
            state: AppState::new(policy),
            detection,
            recipes,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies `event` and runs every call it leads to until the journey
    /// settles in a stage that waits for the user.
    pub async fn dispatch(&mut self, event: Event) -> &AppState {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (next, effects) = update(state, event);
            self.state = next;

            for effect in effects {
                let outcome = run_effect(&self.detection, &self.recipes, effect).await;
                queue.push_back(outcome);
            }
        }
        &self.state
    }
}
