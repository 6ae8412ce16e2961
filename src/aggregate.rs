use std::path::Path;

/// Database client invocation settings used for the bootstrap shell script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInvocation {
    pub command: String,
    pub user: String,
    pub password: String,
}

impl ClientInvocation {
    /// Shell line that feeds `script` to the client
    pub fn line_for(&self, script: &Path) -> String {
        if self.password.is_empty() {
            format!("{} -u {} < {}", self.command, self.user, script.display())
        } else {
            format!(
                "{} -u {} -p{} < {}",
                self.command,
                self.user,
                self.password,
                script.display()
            )
        }
    }
}

impl Default for ClientInvocation {
    fn default() -> Self {
        Self {
            command: "mysql".to_string(),
            user: "root".to_string(),
            password: "password".to_string(),
        }
    }
}

/// The three per-run aggregate files, one line per organism in list order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub client_script: String,
    pub create_script: String,
    pub drop_script: String,
}

impl Aggregates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the lines for one organism whose generated script is at `script`
    pub fn push(&mut self, client: &ClientInvocation, organism: &str, script: &Path) {
        self.client_script.push_str(&client.line_for(script));
        self.client_script.push('\n');

        self.create_script.push_str(&format!("CREATE DATABASE {};\n", organism));
        self.drop_script
            .push_str(&format!("DROP DATABASE IF EXISTS {};\n", organism));
    }
}
