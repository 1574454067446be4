use crate::measurement::MeasurementVector;
use crate::solver::{BodyDimensions, BodySolver};
use crate::variant::Variant;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use strum::IntoEnumIterator;
use tracing::{info, warn};

/// Solver instances keyed by session name, for host bindings.
///
/// Sessions are loaded once and then only read, so concurrent `solve`
/// calls share the read lock.
pub struct BodyForgeState {
    pub sessions: RwLock<HashMap<String, BodySolver>>,
}

impl Default for BodyForgeState {
    fn default() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

pub fn load_dataset(
    state: &BodyForgeState,
    session_id: &str,
    dataset_path: &str,
    variant: Variant,
) -> Result<String, String> {
    let solver = BodySolver::load(dataset_path, variant)
        .map_err(|e| format!("Dataset Load Failed: {}", e))?;

    let mut sessions = state.sessions.write().map_err(|e| e.to_string())?;
    if sessions.insert(session_id.to_string(), solver).is_some() {
        warn!("API: Session '{}' replaced", session_id);
    }
    info!("API: Session '{}' ready ({})", session_id, variant);

    Ok(format!("Session '{}' Loaded Successfully", session_id))
}

/// Loads `<variant>.json` from `data_root` (or `data_root/data`) for every variant.
pub fn load_default_sessions(state: &BodyForgeState, data_root: &str) -> Result<usize, String> {
    let root = Path::new(data_root);
    let mut loaded = 0;
    for variant in Variant::iter() {
        let file = variant.dataset_file();
        let direct = root.join(&file);
        let nested = root.join("data").join(&file);
        let path = if direct.exists() {
            direct
        } else if nested.exists() {
            nested
        } else {
            warn!("API: No dataset for '{}' under {:?}", variant, root);
            continue;
        };
        load_dataset(state, &variant.to_string(), &path.to_string_lossy(), variant)?;
        loaded += 1;
    }
    Ok(loaded)
}

pub fn solve(
    state: &BodyForgeState,
    session_id: &str,
    raw: &MeasurementVector,
) -> Result<BodyDimensions, String> {
    let sessions = state.sessions.read().map_err(|e| e.to_string())?;
    let solver = sessions.get(session_id).ok_or_else(|| {
        format!(
            "Session '{}' not found. Please load dataset first.",
            session_id
        )
    })?;
    solver.solve(raw).map_err(|e| e.to_string())
}

/// Slider defaults for a loaded session.
pub fn default_inputs(
    state: &BodyForgeState,
    session_id: &str,
) -> Result<MeasurementVector, String> {
    let sessions = state.sessions.read().map_err(|e| e.to_string())?;
    sessions
        .get(session_id)
        .map(BodySolver::default_inputs)
        .ok_or_else(|| format!("Session '{}' not found.", session_id))
}
