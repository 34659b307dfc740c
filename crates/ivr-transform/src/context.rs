//! Explicit run context.
//!
//! Field specs that default to "today" or "the requesting user" read these
//! values from the context passed into the resolution call; the engine
//! never consults the clock or any ambient state itself.

use chrono::NaiveDate;

/// The authenticated user on whose behalf a mapping run executes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorContext {
    pub name: String,
    pub email: Option<String>,
    pub npi: Option<String>,
}

/// Per-run context: the run timestamp and optional acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingContext {
    pub now: NaiveDate,
    pub actor: Option<ActorContext>,
}

impl MappingContext {
    pub fn new(now: NaiveDate) -> Self {
        Self { now, actor: None }
    }

    #[must_use]
    pub fn with_actor(mut self, actor: ActorContext) -> Self {
        self.actor = Some(actor);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_builder() {
        let ctx = MappingContext::new(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
            .with_actor(ActorContext {
                name: "Dr. Smith".to_string(),
                email: Some("smith@clinic.example".to_string()),
                npi: None,
            });
        assert_eq!(ctx.actor.unwrap().name, "Dr. Smith");
    }
}
