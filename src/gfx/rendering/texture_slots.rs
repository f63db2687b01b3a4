//! wgpu backend for the texture registry
//!
//! Each slot holds a bind group (texture view + sampler) for bind group 2 of
//! the scene pipeline. Draws whose slot is empty or absent sample a 1x1
//! white fallback texture.

use std::sync::Arc;

use crate::{
    gfx::resources::{DecodedImage, TextureResource, TextureUploader, MAX_TEXTURE_SLOTS},
    wgpu_utils::{layout_entry, sampler, texture_2d},
};

pub struct TextureSlots {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    layout: wgpu::BindGroupLayout,
    slots: Vec<Option<wgpu::BindGroup>>,
    fallback: TextureResource,
    fallback_bind_group: wgpu::BindGroup,
}

impl TextureSlots {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                layout_entry(0, wgpu::ShaderStages::FRAGMENT, texture_2d()),
                layout_entry(
                    1,
                    wgpu::ShaderStages::FRAGMENT,
                    sampler(wgpu::SamplerBindingType::Filtering),
                ),
            ],
        });

        let fallback = TextureResource::create_solid(&device, &queue, [255; 4], "Fallback Texture");
        let fallback_bind_group = Self::create_bind_group(&device, &layout, &fallback, "Fallback");

        Self {
            device,
            queue,
            layout,
            slots: (0..MAX_TEXTURE_SLOTS).map(|_| None).collect(),
            fallback,
            fallback_bind_group,
        }
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        texture: &TextureResource,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Texture Bind Group", label)),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group for `slot`, or the fallback if nothing is bound there.
    pub fn bind_group(&self, slot: Option<usize>) -> &wgpu::BindGroup {
        slot.and_then(|s| self.slots.get(s))
            .and_then(Option::as_ref)
            .unwrap_or(&self.fallback_bind_group)
    }

    /// Releases the fallback texture. Called last during renderer teardown.
    pub fn destroy(self) {
        self.fallback.destroy();
    }
}

impl TextureUploader for TextureSlots {
    type Handle = TextureResource;

    fn upload(&mut self, image: &DecodedImage, label: &str) -> TextureResource {
        TextureResource::create_mipmapped(&self.device, &self.queue, image, label)
    }

    fn bind(&mut self, slot: usize, handle: &TextureResource) {
        let Some(entry) = self.slots.get_mut(slot) else {
            log::warn!("texture slot {} out of range", slot);
            return;
        };
        *entry = Some(Self::create_bind_group(
            &self.device,
            &self.layout,
            handle,
            &format!("Slot {}", slot),
        ));
    }

    fn release(&mut self, slot: usize, handle: TextureResource) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
        handle.destroy();
    }
}
