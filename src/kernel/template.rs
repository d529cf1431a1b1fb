//! Seed projects a session can start from.

use indexmap::IndexMap;

use super::project::SourceFile;
use super::state::{BuildTool, Environment, Framework, ProjectSettings};

const STARTER_APP: &str = r#"import React from 'react';

function App() {
  return (
    <div className="App">
      <header className="App-header">
        <h1>Welcome to Lumi IDE</h1>
        <p>Start building something amazing!</p>
      </header>
    </div>
  );
}

export default App;"#;

const STARTER_INDEX: &str = r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';
import './index.css';

const root = ReactDOM.createRoot(
  document.getElementById('root') as HTMLElement
);

root.render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);"#;

const STARTER_CSS: &str = r#"body {
  margin: 0;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Oxygen',
    'Ubuntu', 'Cantarell', 'Fira Sans', 'Droid Sans', 'Helvetica Neue',
    sans-serif;
  -webkit-font-smoothing: antialiased;
  -moz-osx-font-smoothing: grayscale;
}

.App {
  text-align: center;
}

.App-header {
  background-color: #282c34;
  padding: 20px;
  color: white;
  min-height: 100vh;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
}"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTemplate {
    pub id: String,
    pub display_name: String,
    pub settings: ProjectSettings,
    /// Seeded in order; this becomes the file store's insertion order.
    pub files: Vec<SourceFile>,
    /// Focused (and sole open tab) when the session starts.
    pub active_file: Option<String>,
}

impl ProjectTemplate {
    pub fn empty(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            settings: ProjectSettings::default(),
            files: Vec::new(),
            active_file: None,
        }
    }

    pub fn react_starter() -> Self {
        let mut dependencies = IndexMap::new();
        dependencies.insert("react".to_string(), "^18.2.0".to_string());
        dependencies.insert("react-dom".to_string(), "^18.2.0".to_string());

        Self {
            id: "demo-project".to_string(),
            display_name: "My Lumi Project".to_string(),
            settings: ProjectSettings {
                framework: Framework::React,
                build_tool: BuildTool::Vite,
                dependencies,
                environment: Environment::Development,
            },
            files: vec![
                SourceFile::new("src/App.tsx", STARTER_APP),
                SourceFile::new("src/index.tsx", STARTER_INDEX),
                SourceFile::new("src/index.css", STARTER_CSS),
            ],
            active_file: Some("src/App.tsx".to_string()),
        }
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push(SourceFile::new(path, content));
        self
    }

    pub fn with_active_file(mut self, path: impl Into<String>) -> Self {
        self.active_file = Some(path.into());
        self
    }
}

impl Default for ProjectTemplate {
    fn default() -> Self {
        Self::react_starter()
    }
}
