//! Conversion from Azure DevOps REST types to the canonical SCM model.
//!
//! All functions here are pure: vendor shape in, canonical shape out, no
//! I/O. A required field that is absent fails the whole conversion with
//! [`ScmError::Conversion`]; list converters preserve input order and fail
//! on the first bad element instead of silently dropping it, so provider
//! schema drift surfaces early.

use crate::scm::{
    Commit, Hook, HookEvents, Perm, Reference, Repository, ScmError, Signature, State, Status,
    expand_ref,
};

use super::types::{
    GitBranchStats, GitCommit, GitRepository, GitStatus, GitStatusState, GitUserDate, Subscription,
};

/// Borrow a required field or fail the conversion.
pub(crate) fn required<'a, T>(field: &'static str, value: &'a Option<T>) -> Result<&'a T, ScmError> {
    value.as_ref().ok_or(ScmError::Conversion { field })
}

pub fn convert_repository(src: &GitRepository) -> Result<Repository, ScmError> {
    let project = required("repository.project", &src.project)?;
    Ok(Repository {
        id: required("repository.id", &src.id)?.clone(),
        namespace: required("repository.project.name", &project.name)?.clone(),
        name: required("repository.name", &src.name)?.clone(),
        full_name: required("repository.name", &src.name)?.clone(),
        // The provider does not report effective permissions; fully granted
        // is a known simplification.
        perm: Perm {
            push: true,
            pull: true,
            admin: true,
        },
        branch: src.default_branch.clone().unwrap_or_default(),
        private: project.visibility.as_deref() == Some("private"),
        clone: required("repository.remoteUrl", &src.remote_url)?.clone(),
        clone_ssh: required("repository.sshUrl", &src.ssh_url)?.clone(),
        link: required("repository.webUrl", &src.web_url)?.clone(),
        created: project.last_update_time,
        updated: project.last_update_time,
    })
}

pub fn convert_repository_list(src: &[GitRepository]) -> Result<Vec<Repository>, ScmError> {
    src.iter().map(convert_repository).collect()
}

pub fn convert_branch(src: &GitBranchStats) -> Result<Reference, ScmError> {
    let name = required("branch.name", &src.name)?;
    let commit = required("branch.commit", &src.commit)?;
    Ok(Reference {
        name: name.clone(),
        path: expand_ref(name, "refs/heads/"),
        sha: required("branch.commit.commitId", &commit.commit_id)?.clone(),
    })
}

pub fn convert_branch_list(src: &[GitBranchStats]) -> Result<Vec<Reference>, ScmError> {
    src.iter().map(convert_branch).collect()
}

fn convert_signature(role: &'static str, src: &GitUserDate) -> Result<Signature, ScmError> {
    // Field names are static for error reporting; the two roles differ only
    // in which side of the commit they describe.
    let (name, email, date) = match role {
        "author" => ("commit.author.name", "commit.author.email", "commit.author.date"),
        _ => (
            "commit.committer.name",
            "commit.committer.email",
            "commit.committer.date",
        ),
    };
    Ok(Signature {
        name: required(name, &src.name)?.clone(),
        email: required(email, &src.email)?.clone(),
        date: *required(date, &src.date)?,
        avatar: src.image_url.clone(),
    })
}

pub fn convert_commit(src: &GitCommit) -> Result<Commit, ScmError> {
    let author = required("commit.author", &src.author)?;
    let committer = required("commit.committer", &src.committer)?;
    Ok(Commit {
        sha: required("commit.commitId", &src.commit_id)?.clone(),
        message: required("commit.comment", &src.comment)?.clone(),
        author: convert_signature("author", author)?,
        committer: convert_signature("committer", committer)?,
        link: required("commit.remoteUrl", &src.remote_url)?.clone(),
        // Absent from list payloads; only single-commit reads carry it.
        tree_sha: src.tree_id.clone().unwrap_or_default(),
    })
}

pub fn convert_commit_list(src: &[GitCommit]) -> Result<Vec<Commit>, ScmError> {
    src.iter().map(convert_commit).collect()
}

pub fn convert_status(src: &GitStatus) -> Result<Status, ScmError> {
    let context = required("status.context", &src.context)?;
    Ok(Status {
        state: convert_state(*required("status.state", &src.state)?),
        label: required("status.context.name", &context.name)?.clone(),
        desc: required("status.description", &src.description)?.clone(),
        target: required("status.targetUrl", &src.target_url)?.clone(),
    })
}

pub fn convert_status_list(src: &[GitStatus]) -> Result<Vec<Status>, ScmError> {
    src.iter().map(convert_status).collect()
}

/// Provider state to canonical state.
///
/// Unrecognized provider values map to [`State::Unknown`] as a
/// forward-compatible default; this direction is never an error.
pub fn convert_state(from: GitStatusState) -> State {
    match from {
        GitStatusState::Error => State::Error,
        GitStatusState::Failed => State::Failure,
        GitStatusState::Pending => State::Pending,
        GitStatusState::Succeeded => State::Success,
        GitStatusState::NotSet | GitStatusState::Unknown => State::Unknown,
    }
}

/// Canonical state to provider state.
///
/// Lossy many-to-one: pending and running both collapse to the provider's
/// pending and are indistinguishable once written.
pub fn convert_from_state(from: State) -> GitStatusState {
    match from {
        State::Pending | State::Running => GitStatusState::Pending,
        State::Success => GitStatusState::Succeeded,
        State::Failure => GitStatusState::Failed,
        _ => GitStatusState::Error,
    }
}

pub fn convert_subscription(src: &Subscription) -> Result<Hook, ScmError> {
    // A subscription with no discoverable event type is a data-integrity
    // error, not a hook with empty events.
    let event = required("subscription.eventType", &src.event_type)?;
    Ok(Hook {
        id: required("subscription.id", &src.id)?.clone(),
        name: required("subscription.eventDescription", &src.event_description)?.clone(),
        target: src.target_url().unwrap_or_default().to_string(),
        events: vec![event.clone()],
        active: true,
        skip_verify: false,
    })
}

/// Expand canonical event-interest flags into provider event-type strings.
///
/// The expansion is many-to-many and order-stable: one flag can produce
/// several strings, and two flags may produce the same string.
pub fn hook_events(from: &HookEvents) -> Vec<&'static str> {
    let mut events = Vec::new();
    if from.pull_request {
        events.push("git.pullrequest.created");
    }
    if from.pull_request_comment {
        events.push("ms.vss-code.git-pullrequest-comment-event");
    }
    if from.review {
        events.push("git.pullrequest.updated");
    }
    if from.review_comment {
        events.push("ms.vss-code.git-pullrequest-comment-event");
    }
    if from.issue {
        events.extend([
            "workitem.created",
            "workitem.deleted",
            "workitem.restored",
            "workitem.updated",
        ]);
    }
    if from.issue_comment {
        events.push("workitem.commented");
    }
    if from.push {
        events.push("git.push");
    }
    if from.release {
        events.push("ms.vss-release.release-created-event");
    }
    events
}
