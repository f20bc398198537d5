use std::rc::Rc;

use crate::{
    foundation::core::IRect,
    foundation::error::OutlineResult,
    gpu::backend::GpuBackend,
    outline::{
        config::OutlineTaskConfig,
        debug::DebugOutline,
        effect::{DrawOutline, OutlineEffectPipelines},
        items::{FetchOutlineItems, SortOutlineShapes},
        job::{FrameInputs, FrameStats, OutlineJob, OutlineVaryings},
        mask::DrawOutlineMask,
        params::{MAX_OUTLINE_COUNT, SharedOutlineParameters},
        plumber::ShapePlumber,
        resources::PrepareOutline,
        shaders::ShaderAssets,
    },
};

/// The outline post-process: an ordered list of jobs covering every outline group.
///
/// Job order is fixed at build time:
/// `PrepareOutline`, then per group `OutlineFetchItems{i}`, `OutlineSort{i}`,
/// `OutlineMask{i}`, `OutlineEffect{i}`, then `OutlineDebug`.
///
/// Call [`OutlineTask::configure`] before the first [`OutlineTask::run`].
#[derive(Debug)]
pub struct OutlineTask {
    jobs: Vec<OutlineJob>,
    shared: Rc<SharedOutlineParameters>,
    plumber: ShapePlumber,
    effect_pipelines: OutlineEffectPipelines,
    varyings: OutlineVaryings,
}

impl OutlineTask {
    /// Create every pipeline, buffer and job. On error nothing stays allocated.
    #[tracing::instrument(skip_all)]
    pub fn build(backend: &mut dyn GpuBackend, shaders: &ShaderAssets) -> OutlineResult<Self> {
        // Template errors surface before any GPU object exists.
        let debug = DebugOutline::build("OutlineDebug", backend, shaders)?;
        let plumber = match ShapePlumber::build_mask(backend, shaders) {
            Ok(p) => p,
            Err(e) => {
                debug.release(backend);
                return Err(e);
            }
        };
        let effect_pipelines = match OutlineEffectPipelines::build(backend, shaders) {
            Ok(p) => p,
            Err(e) => {
                debug.release(backend);
                plumber.release(backend);
                return Err(e);
            }
        };
        let shared = Rc::new(SharedOutlineParameters::new());

        let mut task = Self {
            jobs: Vec::with_capacity(2 + 4 * MAX_OUTLINE_COUNT),
            shared,
            plumber,
            effect_pipelines,
            varyings: OutlineVaryings::default(),
        };
        task.jobs
            .push(OutlineJob::Prepare(PrepareOutline::new("PrepareOutline")));
        for i in 0..MAX_OUTLINE_COUNT {
            let effect = match DrawOutline::build(
                format!("OutlineEffect{i}"),
                i,
                backend,
                effect_pipelines,
                task.shared.clone(),
            ) {
                Ok(j) => j,
                Err(e) => {
                    debug.release(backend);
                    task.release(backend);
                    return Err(e);
                }
            };
            task.jobs.push(OutlineJob::FetchItems(FetchOutlineItems::new(
                format!("OutlineFetchItems{i}"),
                i,
            )));
            task.jobs.push(OutlineJob::Sort(SortOutlineShapes::new(
                format!("OutlineSort{i}"),
                i,
            )));
            task.jobs.push(OutlineJob::Mask(DrawOutlineMask::new(
                format!("OutlineMask{i}"),
                i,
                plumber,
                task.shared.clone(),
            )));
            task.jobs.push(OutlineJob::Effect(effect));
        }
        task.jobs.push(OutlineJob::Debug(debug));

        tracing::debug!(jobs = task.jobs.len(), "outline task built");
        Ok(task)
    }

    /// Validate `config` and hand each job its slice of it.
    #[tracing::instrument(skip_all, fields(groups = config.groups.len()))]
    pub fn configure(&mut self, config: &OutlineTaskConfig) -> OutlineResult<()> {
        config.validate()?;
        for job in &mut self.jobs {
            job.configure(config);
        }
        Ok(())
    }

    /// Run every job once, in order.
    #[tracing::instrument(
        skip_all,
        fields(width = frame.primary.size.width, height = frame.primary.size.height)
    )]
    pub fn run(
        &mut self,
        backend: &mut dyn GpuBackend,
        frame: &FrameInputs<'_>,
    ) -> OutlineResult<FrameStats> {
        self.varyings.reset();
        for job in &mut self.jobs {
            job.run(backend, frame, &mut self.varyings)?;
        }
        Ok(self.varyings.stats)
    }

    /// Rect published by group `group` during the last run.
    pub fn outline_rect(&self, group: usize) -> IRect {
        self.varyings
            .rects
            .get(group)
            .copied()
            .unwrap_or(IRect::ZERO)
    }

    /// Blur widths shared between mask and composite jobs.
    pub fn shared_parameters(&self) -> &SharedOutlineParameters {
        &self.shared
    }

    /// Job names in execution order.
    pub fn job_names(&self) -> Vec<&str> {
        self.jobs.iter().map(OutlineJob::name).collect()
    }

    /// Jobs in execution order.
    pub fn jobs(&self) -> &[OutlineJob] {
        &self.jobs
    }

    /// Free every GPU object the task created.
    pub fn release(self, backend: &mut dyn GpuBackend) {
        for job in self.jobs {
            job.release(backend);
        }
        self.plumber.release(backend);
        self.effect_pipelines.release(backend);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/outline/task.rs"]
mod tests;
