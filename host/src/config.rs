//! Host configuration.

use tanuki_search::policy::SearchPolicy;

/// Settings applied to every search the host starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostConfig {
    /// Base policy. A `search` command's `maxDepth` overrides `max_depth`;
    /// when omitted, the policy default applies.
    pub policy: SearchPolicy,
}

impl HostConfig {
    /// Policy for one request.
    #[must_use]
    pub fn policy_for(&self, max_depth: Option<u32>) -> SearchPolicy {
        let policy = self.policy.clone();
        match max_depth {
            Some(depth) => policy.with_max_depth(depth),
            None => policy,
        }
    }
}
