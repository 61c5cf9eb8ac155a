use anyhow::{Context, Result};
use serde_json::Value;

use crate::converters::ConverterRegistry;
use crate::model::{Entity, EntityKind, Version};
use crate::transport::{SendMethod, Transport};
use crate::wire::{keys, WireObject, WireObjectExt};

/// Version operations against a Redmine server, expressed through the
/// converter registry so every body goes through the same mapping.
pub struct VersionService {
    transport: Box<dyn Transport>,
    registry: ConverterRegistry,
}

impl VersionService {
    pub fn new(transport: Box<dyn Transport>, registry: ConverterRegistry) -> Self {
        Self {
            transport,
            registry,
        }
    }

    pub async fn list(&self, project: &str) -> Result<Vec<Version>> {
        let path = format!("/projects/{}/versions.json", urlencoding::encode(project));
        let response = self
            .transport
            .get_object(&path)
            .await?
            .with_context(|| format!("Project '{project}' not found"))?;

        let items: &[Value] = match response.get(keys::VERSIONS) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };

        let mut versions = Vec::with_capacity(items.len());
        for object in items.iter().filter_map(Value::as_object) {
            if let Some(version) = self.read_version(Some(object))? {
                versions.push(version);
            }
        }
        log::info!(
            "Loaded {} of {} versions for project '{project}'",
            versions.len(),
            response.get_int(keys::TOTAL_COUNT)
        );
        Ok(versions)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Version>> {
        let response = self.transport.get_object(&version_path(id)).await?;
        self.read_wrapped(response.as_ref())
    }

    /// Creates `version` in `project` and returns the server's copy.
    pub async fn create(&self, project: &str, version: &Version) -> Result<Option<Version>> {
        let path = format!("/projects/{}/versions.json", urlencoding::encode(project));
        let body = self.registry.to_wire(&Entity::from(version.clone()));
        let response = self
            .transport
            .send_object(SendMethod::Post, &path, &body)
            .await
            .with_context(|| format!("Failed to create version in '{project}'"))?;
        self.read_wrapped(response.as_ref())
    }

    pub async fn update(&self, id: i64, version: &Version) -> Result<()> {
        let body = self.registry.to_wire(&Entity::from(version.clone()));
        self.transport
            .send_object(SendMethod::Put, &version_path(id), &body)
            .await
            .with_context(|| format!("Failed to update version {id}"))?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.transport
            .delete(&version_path(id))
            .await
            .with_context(|| format!("Failed to delete version {id}"))
    }

    /// Reads the object nested under `"version"` in a single-entity response.
    fn read_wrapped(&self, response: Option<&WireObject>) -> Result<Option<Version>> {
        let inner = response
            .and_then(|r| r.get(keys::VERSION))
            .and_then(Value::as_object);
        self.read_version(inner)
    }

    fn read_version(&self, object: Option<&WireObject>) -> Result<Option<Version>> {
        let entity = self
            .registry
            .from_wire(EntityKind::Version, object)
            .map_err(|err| {
                log::warn!("Rejecting version from Redmine: {err}");
                err
            })
            .context("Malformed version in Redmine response")?;
        Ok(match entity {
            Some(Entity::Version(version)) => Some(version),
            _ => None,
        })
    }
}

fn version_path(id: i64) -> String {
    format!("/versions/{id}.json")
}
