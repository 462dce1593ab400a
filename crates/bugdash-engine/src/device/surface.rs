use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = *caps.formats.first()?;
    if !prefer_srgb {
        return Some(first);
    }

    [wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Rgba8UnormSrgb]
        .into_iter()
        .find(|f| caps.formats.contains(f))
        .or_else(|| caps.formats.iter().copied().find(|f| f.is_srgb()))
        .or(Some(first))
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub(crate) fn choose_present_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if caps.present_modes.contains(&requested) {
        requested
    } else {
        log::warn!("present mode {requested:?} unsupported; using Fifo");
        wgpu::PresentMode::Fifo
    }
}

pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    // Minimized windows report a zero size; keep the old configuration.
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, PresentMode, SurfaceCapabilities, TextureFormat};

    fn caps(formats: Vec<TextureFormat>) -> SurfaceCapabilities {
        SurfaceCapabilities {
            formats,
            present_modes: vec![PresentMode::Fifo, PresentMode::Mailbox],
            alpha_modes: vec![CompositeAlphaMode::Opaque],
            ..Default::default()
        }
    }

    #[test]
    fn prefers_srgb_format() {
        let c = caps(vec![TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb]);
        assert_eq!(choose_surface_format(&c, true), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&c, false), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn no_formats_means_no_surface() {
        assert_eq!(choose_surface_format(&caps(Vec::new()), true), None);
    }

    #[test]
    fn unsupported_modes_fall_back() {
        let c = caps(vec![TextureFormat::Bgra8Unorm]);
        assert_eq!(
            choose_alpha_mode(&c, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_present_mode(&c, PresentMode::Immediate), PresentMode::Fifo);
        assert_eq!(choose_present_mode(&c, PresentMode::Mailbox), PresentMode::Mailbox);
    }
}
