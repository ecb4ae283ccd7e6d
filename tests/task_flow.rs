use std::time::Duration;

use futures::StreamExt;
use todoers::container::AppContainer;
use todoers::data::TaskDatabase;
use todoers::domain::TaskUseCases;
use todoers::Task;

fn open(dir: &tempfile::TempDir) -> TaskUseCases {
    let database = TaskDatabase::open(dir.path().join("todos.db")).unwrap();
    AppContainer::new(&database).use_cases()
}

fn task_at(title: &str, created_at: i64) -> Task {
    Task {
        created_at,
        ..Task::new(title, "")
    }
}

#[tokio::test]
async fn buy_milk_example() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = open(&dir);

    let id = tasks.add.execute(&Task::new("Buy milk", "2%")).await.unwrap();
    let all = tasks.observe.execute().next().await.unwrap().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Buy milk");
    assert!(!all[0].is_completed);
    assert_ne!(all[0].id, 0);
    assert_eq!(all[0].id, id);

    let completed = Task {
        is_completed: true,
        ..all[0].clone()
    };
    tasks.update.execute(&completed).await.unwrap();
    let stored = tasks.get_by_id.execute(id).await.unwrap().unwrap();
    assert!(stored.is_completed);
    assert_eq!(stored.created_at, all[0].created_at);
}

#[tokio::test]
async fn newest_tasks_come_first_and_updates_keep_order() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = open(&dir);

    let oldest = tasks.add.execute(&task_at("oldest", 100)).await.unwrap();
    tasks.add.execute(&task_at("middle", 200)).await.unwrap();
    tasks.add.execute(&task_at("newest", 300)).await.unwrap();

    let mut renamed = tasks.get_by_id.execute(oldest).await.unwrap().unwrap();
    renamed.title = "oldest, renamed".into();
    renamed.description = "still last".into();
    tasks.update.execute(&renamed).await.unwrap();

    let titles: Vec<_> = tasks
        .observe
        .execute()
        .next()
        .await
        .unwrap()
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, ["newest", "middle", "oldest, renamed"]);

    let stored = tasks.get_by_id.execute(oldest).await.unwrap().unwrap();
    assert_eq!(stored.id, oldest);
    assert_eq!(stored.created_at, 100);
    assert_eq!(stored.description, "still last");
}

#[tokio::test]
async fn delete_removes_task_everywhere() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = open(&dir);

    let keep = tasks.add.execute(&Task::new("keep", "")).await.unwrap();
    let gone = tasks.add.execute(&Task::new("drop", "")).await.unwrap();
    let mut live = tasks.observe.execute();
    assert_eq!(live.next().await.unwrap().unwrap().len(), 2);

    tasks.delete.execute(gone).await.unwrap();
    let after = tokio::time::timeout(Duration::from_secs(2), live.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, keep);
    assert_eq!(tasks.get_by_id.execute(gone).await.unwrap(), None);

    // deleting again is not an error
    tasks.delete.execute(gone).await.unwrap();
}

#[tokio::test]
async fn toggling_twice_round_trips_through_storage() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = open(&dir);

    let id = tasks.add.execute(&Task::new("Walk dog", "")).await.unwrap();
    let original = tasks.get_by_id.execute(id).await.unwrap().unwrap();

    tasks.update.execute(&original.toggled()).await.unwrap();
    let once = tasks.get_by_id.execute(id).await.unwrap().unwrap();
    assert!(once.is_completed);

    tasks.update.execute(&once.toggled()).await.unwrap();
    let twice = tasks.get_by_id.execute(id).await.unwrap().unwrap();
    assert_eq!(twice, original);
}

#[tokio::test]
async fn data_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let id = open(&dir)
        .add
        .execute(&Task::new("persist me", "across restarts"))
        .await
        .unwrap();

    let reopened = open(&dir);
    let stored = reopened.get_by_id.execute(id).await.unwrap().unwrap();
    assert_eq!(stored.description, "across restarts");
}
