pub const DEMOS: [&str; 5] = ["file", "socket", "resource", "stack", "all"];
pub const DEFAULT_DEMO: &str = "all";

pub const WORK_DIR_PREFIX: &str = "scope-defer-demo";
pub const EXAMPLE_FILE: &str = "example.txt";
pub const EXAMPLE_COPY_FILE: &str = "example_copy.txt";
pub const TEMP_FILE: &str = "temp_data.tmp";
pub const MISSING_FILE: &str = "nonexistent/path/file.txt";

pub const LOOPBACK_ADDR: &str = "127.0.0.1:0";
pub const PING: &[u8] = b"ping";

pub const DB_CONNECTION_STRING: &str = "postgresql://localhost:5432/testdb";
pub const TEXTURE_ID: u32 = 12345;

pub const EXIT_MESSAGE: &str = "process-wide cleanup released at exit";
