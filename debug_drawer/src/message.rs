use glam::Vec3;

use crate::shape::{DrawCommand, DrawShape};

fn v(p: Vec3) -> String {
    format!("X={:.3} Y={:.3} Z={:.3}", p.x, p.y, p.z)
}

/// One human-readable line describing a command's key parameters.
pub fn summarize(command: &DrawCommand) -> String {
    let text = &command.text;
    match command.shape {
        DrawShape::Circle {
            center,
            radius,
            rotation,
        } => format!(
            "LogCircle: '{text}' - Center: ({}) | UpAxis: ({}) | Radius: {radius:.3}",
            v(center),
            v(rotation * Vec3::X),
        ),
        DrawShape::Line { start, end } => {
            format!("LogLine: '{text}' - Start: ({}) | End: ({})", v(start), v(end))
        }
        DrawShape::Box {
            center,
            extent,
            rotation,
        } => {
            let (axis, angle) = rotation.to_axis_angle();
            format!(
                "LogBox: '{text}' - BoxMin: ({}) | BoxMax: ({}) | Rotation: {:.1} deg about ({})",
                v(center - extent),
                v(center + extent),
                angle.to_degrees(),
                v(axis),
            )
        }
        DrawShape::Sphere { center, radius } => format!(
            "LogSphere: '{text}' - Center: ({}) | Radius: {radius:.3}",
            v(center)
        ),
        DrawShape::Capsule {
            base,
            radius,
            half_height,
            rotation,
        } => format!(
            "LogCapsule: '{text}' - Base: ({}) | HalfHeight: {half_height:.3} | Radius: {radius:.3} | Rotation: ({:.3}, {:.3}, {:.3}, {:.3})",
            v(base),
            rotation.x,
            rotation.y,
            rotation.z,
            rotation.w,
        ),
        DrawShape::Arrow {
            start,
            end,
            arrow_size,
        } => format!(
            "LogArrow: '{text}' - Start: ({}) | End: ({}) | ArrowSize: {arrow_size:.3}",
            v(start),
            v(end)
        ),
        DrawShape::Text { location } => {
            format!("LogText: '{text}' - Location: ({})", v(location))
        }
        DrawShape::Cone {
            origin,
            direction,
            length,
            angle_width,
            angle_height,
        } => format!(
            "LogCone: '{text}' - Origin: ({}) | Direction: ({}) | Length: {length:.3} | Angle: {angle_width:.3}x{angle_height:.3}",
            v(origin),
            v(direction),
        ),
    }
}

/// Emit the summary through the `log` facade, using the command's category
/// as the log target so it can be filtered with `RUST_LOG`.
pub fn emit(command: &DrawCommand) {
    let line = summarize(command);
    match command.owner.as_ref().and_then(|owner| owner.name()) {
        Some(owner) => log::info!(target: command.log_category.as_str(), "[{owner}] {line}"),
        None => log::info!(target: command.log_category.as_str(), "{line}"),
    }
}
