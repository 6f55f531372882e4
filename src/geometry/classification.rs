// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face classification for CSG operations
//! Determines whether each face of one solid is inside, outside, or on the
//! surface of the other

use super::face::{Face, FaceId, FaceStatus};
use super::line::Line;
use super::object3d::Object3D;
use super::vertex::{VertexId, VertexStatus};
use crate::config::CsgConfig;
use crate::error::{CsgError, Result};
use crate::utils::TOL;
use rand::Rng;
use std::collections::VecDeque;
use tracing::{debug, warn};

impl Object3D {
    /// Give every face a status relative to `other`.
    ///
    /// Must run after both objects were split against each other. Faces touching
    /// an already classified vertex take its status; otherwise a ray is cast
    /// and the result spreads through the vertex graph up to the boundary.
    pub fn classify_faces<R: Rng>(
        &mut self,
        other: &Object3D,
        config: &CsgConfig,
        rng: &mut R,
    ) -> Result<()> {
        self.rebuild_adjacency();

        let mut ray_traced = 0usize;
        for i in 0..self.faces.len() {
            if self.faces[i].simple_classify(&self.vertices) {
                continue;
            }

            let status = ray_trace_classify(&self.faces[i], i, other, config, rng)?;
            self.faces[i].status = status;
            ray_traced += 1;

            let spread = match status {
                FaceStatus::Inside => VertexStatus::Inside,
                FaceStatus::Outside => VertexStatus::Outside,
                _ => continue,
            };
            for id in self.faces[i].vertices {
                if self.vertices[id].status == VertexStatus::Unknown {
                    self.mark(id, spread);
                }
            }
        }

        debug!(
            faces = self.faces.len(),
            ray_traced,
            inside = self.count_status(FaceStatus::Inside),
            outside = self.count_status(FaceStatus::Outside),
            same = self.count_status(FaceStatus::Same),
            opposite = self.count_status(FaceStatus::Opposite),
            "classified faces"
        );
        Ok(())
    }

    /// Recompute vertex neighbours from the current face list
    fn rebuild_adjacency(&mut self) {
        for vertex in &mut self.vertices {
            vertex.clear_adjacency();
        }
        for face in &self.faces {
            let [a, b, c] = face.vertices;
            for (from, to) in [(a, b), (b, c), (c, a)] {
                self.vertices[from].add_adjacent(to);
                self.vertices[to].add_adjacent(from);
            }
        }
    }

    /// Set `status` on `start` and on every UNKNOWN vertex reachable from it
    /// through UNKNOWN vertices
    fn mark(&mut self, start: VertexId, status: VertexStatus) {
        let mut queue = VecDeque::from([start]);
        self.vertices[start].status = status;

        while let Some(id) = queue.pop_front() {
            let neighbours: Vec<VertexId> = self.vertices[id].adjacent().collect();
            for next in neighbours {
                if self.vertices[next].status == VertexStatus::Unknown {
                    self.vertices[next].status = status;
                    queue.push_back(next);
                }
            }
        }
    }
}

/// Classify `face` by casting a ray from its centroid along its normal and
/// looking at the nearest face of `other` it hits.
///
/// A ray lying in the plane of a candidate face is ambiguous; its direction is
/// then perturbed and the scan restarted, at most `config.max_ray_retries`
/// times.
pub fn ray_trace_classify<R: Rng>(
    face: &Face,
    face_id: FaceId,
    other: &Object3D,
    config: &CsgConfig,
    rng: &mut R,
) -> Result<FaceStatus> {
    let mut ray = Line::new(face.normal(), face.centroid());
    let mut attempts = 0u32;

    let closest = 'scan: loop {
        let mut closest: Option<(&Face, f64)> = None;

        for candidate in other.faces() {
            let Some(hit) = ray.plane_intersection(&candidate.normal(), &candidate.points()[0])
            else {
                continue;
            };

            let dot = candidate.normal().dot(&ray.direction);
            let distance = ray.point_to_point_distance(&hit);

            if distance.abs() < TOL && dot.abs() < TOL {
                attempts += 1;
                if attempts > config.max_ray_retries {
                    return Err(CsgError::ClassificationFailed {
                        face: face_id,
                        attempts: attempts - 1,
                    });
                }
                warn!(face = face_id, attempts, "classification ray lies in a face plane, perturbing");
                ray.perturb_direction(rng, config.perturbation);
                continue 'scan;
            }

            if distance.abs() < TOL {
                if candidate.has_point(&hit) {
                    break 'scan Some((candidate, 0.0));
                }
            } else if dot.abs() > TOL
                && distance > TOL
                && closest.map_or(true, |(_, best)| distance < best)
                && candidate.has_point(&hit)
            {
                closest = Some((candidate, distance));
            }
        }

        break closest;
    };

    let Some((hit_face, distance)) = closest else {
        return Ok(FaceStatus::Outside);
    };

    let dot = hit_face.normal().dot(&ray.direction);
    let status = if distance.abs() < TOL {
        if dot > TOL {
            FaceStatus::Same
        } else {
            FaceStatus::Opposite
        }
    } else if dot > TOL {
        FaceStatus::Inside
    } else {
        FaceStatus::Outside
    };
    Ok(status)
}
