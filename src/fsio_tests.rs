    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fsio_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.html");
        write_file(&path, b"<p>hi</p>").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"<p>hi</p>");
    }

    #[test]
    fn test_fsio_write_truncates_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.html");
        write_file(&path, b"a much longer first version").unwrap();
        write_file(&path, b"short").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"short");
    }

    #[test]
    fn test_fsio_read_missing_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.md");
        let err = read_file(&path).unwrap_err();
        match &err {
            Error::Read { path: p, .. } => assert_eq!(p, &path),
            other => panic!("expected Read error, got {other:?}"),
        }
        assert!(err.to_string().contains("missing.md"));
    }

    #[test]
    fn test_fsio_write_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.html");
        let err = write_file(&path, b"x").unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(err.to_string().contains("out.html"));
    }

    #[cfg(unix)]
    #[test]
    fn test_fsio_new_file_mode_is_0644() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("mode.html");
        write_file(&path, b"x").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        // umask may only clear bits, never add them.
        assert_eq!(mode & 0o777 & !0o644, 0);
        assert_ne!(mode & 0o600, 0);
    }
