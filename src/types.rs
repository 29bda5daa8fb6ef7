use std::collections::HashMap;

pub type JobId = String;
pub type Pid = i32;
pub type Metadata = HashMap<String, String>;
