/// Single-service build descriptor
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Multi-service descriptors, in the order docker-compose itself prefers them
pub const COMPOSE_FILE_NAMES: [&str; 4] = [
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
];

/// How the working copy builds its container(s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildDescriptor {
    Dockerfile,
    Compose { file: String },
}

impl BuildDescriptor {
    /// Pick the descriptor from the file names present at the working copy root.
    ///
    /// A compose file wins over a Dockerfile, matching the deploy path chosen
    /// on the remote side.
    pub fn from_file_names<'a, I>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = names.into_iter().collect();
        if let Some(file) = COMPOSE_FILE_NAMES.iter().find(|c| names.contains(c)) {
            return Some(BuildDescriptor::Compose {
                file: (*file).to_string(),
            });
        }
        names
            .contains(&DOCKERFILE_NAME)
            .then_some(BuildDescriptor::Dockerfile)
    }

    pub fn file_name(&self) -> &str {
        match self {
            BuildDescriptor::Dockerfile => DOCKERFILE_NAME,
            BuildDescriptor::Compose { file } => file,
        }
    }
}
