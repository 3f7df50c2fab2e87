//! ==============================================================================
//! climate.rs - Device identity and thermostat endpoints
//! ==============================================================================
//!
//! purpose:
//!     the simulated thermostat surface: device identity, temperature set
//!     points (with a freshly rolled current readout per GET), the
//!     day/night schedule, and the mode/heating pairs. Every PUT
//!     overwrites state wholesale and echoes the resulting state back.
//!
//! ==============================================================================

use axum::{extract::State, Json};

use crate::error::ApiJson;
use crate::state::{
    Device, ModeReport, ModeUpdate, Schedule, SharedState, TempReport, TempSettings,
};

/// GET /device (status surface) and GET /rest/v1/device
pub async fn device(State(state): State<SharedState>) -> Json<Device> {
    Json(state.read().await.device())
}

/// GET /rest/v1/temp
pub async fn temp(State(state): State<SharedState>) -> Json<TempReport> {
    Json(state.read().await.temp_report())
}

/// PUT /rest/v1/temp - overwrite the set points, echo a fresh report
pub async fn update_temp(
    State(state): State<SharedState>,
    ApiJson(settings): ApiJson<TempSettings>,
) -> Json<TempReport> {
    let mut state = state.write().await;
    state.set_temps(settings);
    Json(state.temp_report())
}

/// GET /rest/v1/time
pub async fn schedule(State(state): State<SharedState>) -> Json<Schedule> {
    Json(state.read().await.schedule())
}

/// PUT /rest/v1/time
pub async fn update_schedule(
    State(state): State<SharedState>,
    ApiJson(schedule): ApiJson<Schedule>,
) -> Json<Schedule> {
    let mut state = state.write().await;
    state.set_schedule(schedule);
    Json(state.schedule())
}

/// GET /rest/v1/mode
pub async fn modes(State(state): State<SharedState>) -> Json<ModeReport> {
    Json(state.read().await.modes())
}

/// PUT /rest/v1/mode
pub async fn update_modes(
    State(state): State<SharedState>,
    ApiJson(update): ApiJson<ModeUpdate>,
) -> Json<ModeReport> {
    let mut state = state.write().await;
    state.set_modes(update);
    Json(state.modes())
}
