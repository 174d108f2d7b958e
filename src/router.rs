use crate::bridge_error::BridgeError;
use crate::domain::envelope::{
    CONTROL_NAMESPACE, DISCOVERY_NAMESPACE, Envelope, ErrorPayload, Response, control_response, discovery_response, error_response,
};
use crate::domain::event::Event;
use crate::invocation::{Invocation, Outcome};
use crate::particle::{ParticleClient, discover, set_power};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

pub const SWITCH_ON_OFF_REQUEST: &str = "SwitchOnOffRequest";

/// What an event asks for, validated before anything touches the network.
#[derive(Debug, PartialEq)]
pub enum Route<'a> {
    Discover {
        access_token: &'a str,
    },
    Control {
        appliance_id: &'a str,
        access_token: &'a str,
        turn_on: bool,
    },
}

pub fn route(event: &Event) -> Result<Route<'_>, BridgeError> {
    match event.header.namespace.as_str() {
        DISCOVERY_NAMESPACE => Ok(Route::Discover {
            access_token: access_token(event)?,
        }),
        CONTROL_NAMESPACE => {
            if event.header.name != SWITCH_ON_OFF_REQUEST {
                return Err(BridgeError::UnsupportedOperation(event.header.name.clone()));
            }

            let appliance = event
                .payload
                .appliance
                .as_ref()
                .ok_or_else(|| BridgeError::InvalidInput("missing appliance".to_string()))?;

            Ok(Route::Control {
                appliance_id: &appliance.appliance_id,
                access_token: access_token(event)?,
                turn_on: event.payload.turn_on(),
            })
        }
        namespace => Err(BridgeError::UnsupportedNamespace(namespace.to_string())),
    }
}

fn access_token(event: &Event) -> Result<&str, BridgeError> {
    event
        .payload
        .access_token()
        .ok_or_else(|| BridgeError::InvalidInput("missing access token".to_string()))
}

#[instrument(skip_all, fields(namespace = %event.header.namespace, name = %event.header.name))]
pub async fn handle(client: &ParticleClient, event: &Event) -> Result<Response, BridgeError> {
    debug!(payload = ?event.payload, "🔵 Received event");

    match route(event)? {
        Route::Discover { access_token } => {
            let appliances = discover(client, access_token).await?;
            Ok(discovery_response(appliances))
        }
        Route::Control {
            appliance_id,
            access_token,
            turn_on,
        } => {
            set_power(client, appliance_id, access_token, turn_on).await?;
            Ok(control_response())
        }
    }
}

/// Handles one event and completes the invocation with its result or error envelope.
pub async fn invoke<I: Invocation>(client: &ParticleClient, event: &Event, invocation: I) -> I::Output {
    let outcome = match handle(client, event).await {
        Ok(response) => {
            info!(namespace = %event.header.namespace, "✅ Handled '{}'", event.header.name);
            Outcome::Succeed(response)
        }
        Err(e) => {
            warn!(namespace = %event.header.namespace, "⚠️ Unable to handle '{}': {}", event.header.name, e);
            Outcome::Fail(error_response(&event.header.name, &e))
        }
    };

    invocation.complete(outcome)
}

/// Reads an event document. When it cannot be read, the error envelope keeps whatever request name is present.
pub fn parse_event(raw: &str) -> Result<Event, Envelope<ErrorPayload>> {
    serde_json::from_str::<Event>(raw).map_err(|e| {
        let name = serde_json::from_str::<Value>(raw)
            .ok()
            .and_then(|value| value.pointer("/header/name").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_default();
        error_response(&name, &BridgeError::InvalidInput(format!("unreadable event: {}", e)))
    })
}
