use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use scope_defer::{defer_release_file, register_cleanup};

use super::handle_of;
use crate::constants::*;

fn remove_path(path: PathBuf) {
    let removed = if path.is_dir() {
        fs::remove_dir_all(&path)
    } else {
        fs::remove_file(&path)
    };
    match removed {
        Ok(()) => log::info!("Removed {}", path.display()),
        Err(e) => log::warn!("Failed to remove {}: {e}", path.display()),
    }
}

pub fn run(work_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(work_dir)?;
    let _work_dir = register_cleanup(remove_path, Some(work_dir.to_path_buf()));

    let example = work_dir.join(EXAMPLE_FILE);

    log::info!("Example 1: Basic file operations");
    {
        let mut file = defer_release_file(Some(File::create(&example)?));
        writeln!(handle_of(&mut file)?, "Hello, World!")?;
        log::info!("File written successfully");
    }

    log::info!("Example 2: Multiple files with error handling");
    {
        let mut source = defer_release_file(Some(File::open(&example)?));
        let mut dest = defer_release_file(Some(File::create(work_dir.join(EXAMPLE_COPY_FILE))?));

        let copied = io::copy(handle_of(&mut source)?, handle_of(&mut dest)?)?;
        log::info!("File copied successfully, {copied} bytes");
    }

    log::info!("Example 3: Temporary file cleanup");
    {
        let temp_path = work_dir.join(TEMP_FILE);
        // registered first so it runs after the close below
        let _remove = register_cleanup(remove_path, Some(temp_path.clone()));
        let mut temp = defer_release_file(Some(File::create(&temp_path)?));

        writeln!(handle_of(&mut temp)?, "Temporary data")?;
        log::info!("Temporary file created and will be automatically closed");
    }

    log::info!("Example 4: Open failure");
    match File::open(work_dir.join(MISSING_FILE)) {
        Err(e) => log::info!("Expected file open failure handled correctly: {e}"),
        Ok(file) => {
            let _file = defer_release_file(Some(file));
            log::warn!("Unexpected file open success");
        }
    }

    Ok(())
}
