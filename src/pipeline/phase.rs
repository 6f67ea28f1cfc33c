//! Pipeline phase state machine.

use std::fmt;

/// The phases of a packaging run, in their single forward order.
///
/// Every step method on the pipeline requires a specific current phase and
/// moves to the next one when it succeeds. There is no path backwards and no
/// way to skip ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The external bundler has finished writing compiled output and the
    /// manifest into the output directory.
    RawOutputReady,

    /// Both asset trees are registered in the in-memory bundle.
    AssetsEmitted,

    /// The descriptor is registered in the in-memory bundle.
    DescriptorEmitted,

    /// Every registered artifact has been flushed to the output directory.
    OutputWritten,

    /// Descriptor references point at built files.
    DescriptorRewritten,

    /// The manifest has been removed, or retained because it was requested.
    ManifestCleaned,

    /// The archive step has run; an archive exists when one was configured.
    Packaged,
}

impl Phase {
    /// Returns the next phase, or `None` at the end of the run.
    pub fn successor(self) -> Option<Phase> {
        match self {
            Phase::RawOutputReady => Some(Phase::AssetsEmitted),
            Phase::AssetsEmitted => Some(Phase::DescriptorEmitted),
            Phase::DescriptorEmitted => Some(Phase::OutputWritten),
            Phase::OutputWritten => Some(Phase::DescriptorRewritten),
            Phase::DescriptorRewritten => Some(Phase::ManifestCleaned),
            Phase::ManifestCleaned => Some(Phase::Packaged),
            Phase::Packaged => None,
        }
    }

    /// Returns the phase name used in errors and log output.
    pub fn name(self) -> &'static str {
        match self {
            Phase::RawOutputReady => "raw-output-ready",
            Phase::AssetsEmitted => "assets-emitted",
            Phase::DescriptorEmitted => "descriptor-emitted",
            Phase::OutputWritten => "output-written",
            Phase::DescriptorRewritten => "descriptor-rewritten",
            Phase::ManifestCleaned => "manifest-cleaned",
            Phase::Packaged => "packaged",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successors_form_a_single_forward_chain() {
        let mut phase = Phase::RawOutputReady;
        let mut visited = vec![phase];
        while let Some(next) = phase.successor() {
            visited.push(next);
            phase = next;
        }
        assert_eq!(visited.len(), 7);
        assert_eq!(phase, Phase::Packaged);
    }

    #[test]
    fn terminal_phase_has_no_successor() {
        assert_eq!(Phase::Packaged.successor(), None);
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(Phase::RawOutputReady.to_string(), "raw-output-ready");
        assert_eq!(Phase::ManifestCleaned.to_string(), "manifest-cleaned");
    }
}
