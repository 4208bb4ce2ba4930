use std::path::Path;

/// Marker that replaces the home-directory token in decoded project paths
const HOME_MARKER: &str = "~/";

/// Encodes a path the way Claude Code names its project directories:
/// path separators and dots become dashes
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ai_history_query::encode_project_dir_name;
///
/// assert_eq!(encode_project_dir_name(Path::new("/Users/kyle/Code/app")), "-Users-kyle-Code-app");
/// ```
pub fn encode_project_dir_name(path: &Path) -> String {
    path.to_string_lossy().chars().map(|c| if c == '/' || c == '.' { '-' } else { c }).collect()
}

/// Decodes project directory names back into readable paths
///
/// The home-directory token (e.g. `-Users-kyle-`) becomes `~/`, then every
/// remaining dash becomes `/`. This is lossy: a real dash inside a path segment
/// decodes as a separator (`-Users-kyle-my-app` → `~/my/app`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPathDecoder {
    home_token: Option<String>,
}

impl ProjectPathDecoder {
    /// Decoder with an explicit home token such as `-Users-kyle-`
    pub fn new(home_token: impl Into<String>) -> Self {
        Self { home_token: Some(home_token.into()) }
    }

    /// Decoder whose token is derived from the given home directory
    pub fn for_home_dir(home: &Path) -> Self {
        Self::new(format!("{}-", encode_project_dir_name(home)))
    }

    /// Decoder for the current user's home directory, or one that never
    /// substitutes `~/` when no home directory is known
    pub fn from_env() -> Self {
        dirs::home_dir().map(|home| Self::for_home_dir(&home)).unwrap_or_default()
    }

    pub fn home_token(&self) -> Option<&str> {
        self.home_token.as_deref()
    }

    /// # Examples
    ///
    /// ```
    /// use ai_history_query::ProjectPathDecoder;
    ///
    /// let decoder = ProjectPathDecoder::new("-Users-kyle-");
    /// assert_eq!(decoder.decode("-Users-kyle-Code-project"), "~/Code/project");
    /// assert_eq!(decoder.decode("-opt-tools"), "/opt/tools");
    /// ```
    pub fn decode(&self, encoded: &str) -> String {
        let stripped = self.home_token.as_deref().and_then(|token| encoded.strip_prefix(token));

        match stripped {
            Some(rest) => format!("{}{}", HOME_MARKER, rest.replace('-', "/")),
            None => encoded.replace('-', "/"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_encode_project_dir_name() {
        assert_eq!(encode_project_dir_name(Path::new("/Users/foo/bar")), "-Users-foo-bar");
        assert_eq!(encode_project_dir_name(Path::new("/home/me/.dotfiles")), "-home-me--dotfiles");
    }

    #[test]
    fn test_decode_under_home() {
        let decoder = ProjectPathDecoder::new("-Users-kyle-");
        assert_eq!(decoder.decode("-Users-kyle-Code-dotfiles"), "~/Code/dotfiles");
    }

    #[test]
    fn test_decode_outside_home() {
        let decoder = ProjectPathDecoder::new("-Users-kyle-");
        assert_eq!(decoder.decode("-tmp-scratch"), "/tmp/scratch");
        assert_eq!(decoder.decode("-Users-other-Code"), "/Users/other/Code");
    }

    #[test]
    fn test_decode_home_itself_keeps_absolute_path() {
        // The token includes the trailing dash, so the bare home dir does not match
        let decoder = ProjectPathDecoder::new("-Users-kyle-");
        assert_eq!(decoder.decode("-Users-kyle"), "/Users/kyle");
    }

    #[test]
    fn test_decode_dash_collision_is_lossy() {
        let decoder = ProjectPathDecoder::new("-Users-kyle-");
        assert_eq!(decoder.decode("-Users-kyle-Code-my-app"), "~/Code/my/app");
    }

    #[test]
    fn test_decode_without_token() {
        let decoder = ProjectPathDecoder::default();
        assert_eq!(decoder.decode("-Users-kyle-Code"), "/Users/kyle/Code");
    }

    #[test]
    fn test_for_home_dir_builds_token() {
        let decoder = ProjectPathDecoder::for_home_dir(&PathBuf::from("/home/alice"));
        assert_eq!(decoder.home_token(), Some("-home-alice-"));
        assert_eq!(decoder.decode("-home-alice-src-api"), "~/src/api");
    }
}
