// Copyright (c) 2018-2022 The MobileCoin Foundation

use crate::{db::SignatureDb, logger::Logger};
use tempfile::{tempdir, TempDir};

pub struct TestDbContext {
    // Kept here to avoid the temp directory being deleted.
    _temp_dir: TempDir,
    db_path: String,
}

impl Default for TestDbContext {
    fn default() -> Self {
        let temp_dir = tempdir().expect("failed getting temp dir");
        let db_path = temp_dir
            .path()
            .join("wikisig.db")
            .into_os_string()
            .into_string()
            .unwrap();
        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }
}

impl TestDbContext {
    pub fn get_db_instance(&self, logger: Logger) -> SignatureDb {
        SignatureDb::new_from_path(&self.db_path, 7, logger)
            .expect("failed creating new SignatureDb")
    }
}
