// Rows naming what a delete command acts on, labelled from the snapshot.
// Unknown ids are still listed; the store decides whether they exist.

use chatsweep_types::{last_path_segment, short_id, AnalysisResult, ChatSession};

use crate::presentation::view_models::DeleteTargetViewModel;

pub fn project(snapshot: &AnalysisResult, path: &str) -> DeleteTargetViewModel {
    match snapshot.find_project(path) {
        Some(project) => DeleteTargetViewModel {
            id: path.to_string(),
            label: project.display_name(),
            sessions: Some(project.chat_count),
        },
        None => DeleteTargetViewModel {
            id: path.to_string(),
            label: last_path_segment(path).unwrap_or(path).to_string(),
            sessions: None,
        },
    }
}

pub fn workspace(snapshot: &AnalysisResult, id: &str) -> DeleteTargetViewModel {
    match snapshot.find_workspace(id) {
        Some(ws) => DeleteTargetViewModel {
            id: id.to_string(),
            label: ws.display_name(),
            sessions: Some(ws.chat_count),
        },
        None => DeleteTargetViewModel {
            id: id.to_string(),
            label: short_id(id).to_string(),
            sessions: None,
        },
    }
}

pub fn session(sessions: &[ChatSession], id: &str) -> DeleteTargetViewModel {
    let label = sessions
        .iter()
        .find(|s| s.id == id)
        .filter(|s| !s.name.is_empty())
        .map(|s| s.name.clone())
        .unwrap_or_else(|| short_id(id).to_string());

    DeleteTargetViewModel {
        id: id.to_string(),
        label,
        sessions: None,
    }
}
