use std::fmt;
use std::str::FromStr;

const LIST: &str = "todo_list";
const EDIT_PREFIX: &str = "add_edit_todo/";
/// Id placeholder in an edit route that means "create a new task".
pub const NEW_TASK_SENTINEL: i64 = -1;

/// The two screens the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Edit { task_id: Option<i64> },
}

impl Route {
    pub fn create() -> Self {
        Self::Edit { task_id: None }
    }

    pub fn edit(task_id: i64) -> Self {
        Self::Edit {
            task_id: Some(task_id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str(LIST),
            Self::Edit { task_id } => {
                write!(f, "{EDIT_PREFIX}{}", task_id.unwrap_or(NEW_TASK_SENTINEL))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown route `{0}` (expected `todo_list` or `add_edit_todo/<id>`)")]
pub struct ParseRouteError(String);

impl FromStr for Route {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == LIST {
            return Ok(Self::List);
        }
        let id = s
            .strip_prefix(EDIT_PREFIX)
            .and_then(|id| id.parse::<i64>().ok())
            .ok_or_else(|| ParseRouteError(s.to_string()))?;
        match id {
            NEW_TASK_SENTINEL => Ok(Self::create()),
            id if id > 0 => Ok(Self::edit(id)),
            _ => Err(ParseRouteError(s.to_string())),
        }
    }
}
