use courier::storage::{FileStore, StorageError};

#[tokio::test]
async fn test_write_then_read_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.write("notes.txt", b"hello world").await.unwrap();

    assert_eq!(store.read("notes.txt").await.unwrap(), b"hello world".to_vec());
}

#[tokio::test]
async fn test_write_truncates_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.write("f", b"a much longer first version").await.unwrap();
    store.write("f", b"short").await.unwrap();

    assert_eq!(store.read("f").await.unwrap(), b"short".to_vec());
}

#[tokio::test]
async fn test_write_creates_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nested").join("root");
    let store = FileStore::new(&root);

    store.write("f", b"x").await.unwrap();

    assert!(root.join("f").is_file());
}

#[tokio::test]
async fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    let result = store.read("absent").await;

    assert!(matches!(result, Err(StorageError::NotFound(name)) if name == "absent"));
}

#[tokio::test]
async fn test_traversal_names_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("root"));

    for name in ["..", "../outside", "/etc/passwd", ""] {
        assert!(matches!(
            store.write(name, b"x").await,
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            store.read(name).await,
            Err(StorageError::InvalidName(_))
        ));
    }
    assert!(!dir.path().join("outside").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_written_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.write("perm", b"x").await.unwrap();

    let mode = std::fs::metadata(dir.path().join("perm")).unwrap().permissions().mode();
    assert_eq!(mode & 0o600, 0o600);
}

#[tokio::test]
async fn test_concurrent_writes_and_reads_never_observe_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    let a = vec![b'a'; 64 * 1024];
    let b = vec![b'b'; 64 * 1024];
    store.write("shared", &a).await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        let payload = if i % 2 == 0 { a.clone() } else { b.clone() };
        tasks.push(tokio::spawn(async move {
            store.write("shared", &payload).await.unwrap();
            store.read("shared").await.unwrap()
        }));
    }

    for task in tasks {
        let contents = task.await.unwrap();
        assert!(contents == a || contents == b, "observed a torn file");
    }
}
