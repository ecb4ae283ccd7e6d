use rusqlite::Row;

/// One row of the `todos` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntity {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: i64,
}

impl TaskEntity {
    pub(crate) const COLUMNS: &'static str = "id, title, description, is_completed, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            is_completed: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}
