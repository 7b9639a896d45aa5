//! Fatal, non-diagnostic errors. Reserved for the two conditions spec §7
//! calls fatal (missing core library, placeholder escape) plus the
//! infrastructure failures (I/O, malformed policy JSON) that abort a phase
//! outright rather than being recorded and carried forward.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("core library not found in the transitive closure of {0} seed assembly path(s)")]
    MissingCoreLibrary(usize),

    #[error("placeholder type reference escaped Shape and reached {phase}: {detail}")]
    PlaceholderEscaped { phase: &'static str, detail: String },

    #[error("failed to read policy file {path}: {source}")]
    PolicyRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse policy JSON in {path}: {source}")]
    PolicyParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write output file {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("two assembly paths expose the name '{name}' with different public key tokens")]
    MixedSigning { name: String },

    #[error("phase gate recorded {0} error-severity diagnostic(s); emit skipped")]
    PhaseGateFailed(usize),
}

pub type BuildResult<T> = Result<T, BuildError>;
