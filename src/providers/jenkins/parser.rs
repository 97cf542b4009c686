use roxmltree::{Document, Node};

use super::status::map_status;
use super::types::Job;
use crate::error::{JobscopeError, Result};

/// Element name of job nodes, both at the top level and nested in folders.
const JOB_TAG: &str = "job";

/// Identifier sources, in order of precedence.
const ID_FIELDS: [&str; 2] = ["fullName", "name"];

const BRANCH_JOB_PROPERTY: &str = "org.jenkinsci.plugins.workflow.multibranch.BranchJobProperty";
const PULL_REQUEST_HEAD: &str = "org.jenkinsci.plugins.github_branch_source.PullRequestSCMHead";

/// Parses a job listing into its top-level jobs, each with its nested jobs attached.
///
/// The root element is usually a container such as `<hudson>` whose `job`
/// children are the listed jobs. A root that names a job itself is returned
/// as the single entry. An empty container yields an empty list.
///
/// # Errors
///
/// Returns an error if the markup is not well-formed or a build timestamp is
/// not an integer.
pub fn parse_forest(xml: &str) -> Result<Vec<Job>> {
    let document = Document::parse(xml)?;
    let root = document.root_element();

    if resolve_id(root).is_some() {
        return Ok(parse_tree(root)?.into_iter().collect());
    }

    parse_children(root)
}

/// Parses a single job document, attaching its child jobs unranked.
///
/// Returns `None` when the root carries no job content (e.g., `<hudson/>`).
///
/// # Errors
///
/// Returns an error if the markup is not well-formed or a build timestamp is
/// not an integer.
pub fn parse_job(xml: &str) -> Result<Option<Job>> {
    let document = Document::parse(xml)?;
    parse_tree(document.root_element())
}

fn parse_tree(node: Node) -> Result<Option<Job>> {
    let Some(mut job) = parse_node(node)? else {
        return Ok(None);
    };

    if child_elements(node, JOB_TAG).next().is_some() {
        job.jobs = Some(parse_children(node)?);
    }

    Ok(Some(job))
}

fn parse_children(node: Node) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();
    for child in child_elements(node, JOB_TAG) {
        match parse_tree(child)? {
            Some(job) => jobs.push(job),
            // Nameless node: dropped, its nested jobs move up to this level
            None => jobs.extend(parse_children(child)?),
        }
    }
    Ok(jobs)
}

/// Builds the job described by `node` alone, ignoring nested jobs.
fn parse_node(node: Node) -> Result<Option<Job>> {
    let Some(id) = resolve_id(node) else {
        return Ok(None);
    };

    let last_build = child_elements(node, "lastBuild")
        .next()
        .and_then(|last| child_text(last, "timestamp"))
        .map(|value| {
            value
                .parse::<i64>()
                .map_err(|_| JobscopeError::InvalidTimestamp {
                    job: id.clone(),
                    value,
                })
        })
        .transpose()?;

    let status = map_status(child_text(node, "color").as_deref());

    Ok(Some(Job {
        name: child_text(node, "displayName"),
        description: child_text(node, "description"),
        status: status.status,
        building: status.building,
        last_build,
        pull_request_branch: is_pull_request_branch(node),
        jobs: None,
        id,
    }))
}

fn resolve_id(node: Node) -> Option<String> {
    ID_FIELDS
        .iter()
        .find_map(|&field| child_text(node, field))
}

fn is_pull_request_branch(node: Node) -> bool {
    child_elements(node, "property")
        .filter(|property| property.attribute("_class") == Some(BRANCH_JOB_PROPERTY))
        .flat_map(|property| child_elements(property, "branch"))
        .flat_map(|branch| child_elements(branch, "head"))
        .any(|head| head.attribute("_class") == Some(PULL_REQUEST_HEAD))
}

fn child_elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name(tag))
}

/// Trimmed text of the first `tag` child, `None` when missing or blank.
///
/// All text under the element is joined, so comments or nested markup do
/// not cut the value short.
fn child_text(node: Node, tag: &'static str) -> Option<String> {
    let child = child_elements(node, tag).next()?;
    let text: String = child
        .descendants()
        .filter(Node::is_text)
        .filter_map(|text| text.text())
        .collect();

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
