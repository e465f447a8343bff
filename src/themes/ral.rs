use egui::Color32;

/// The RAL classic colours the chart theme draws from: code, name, sRGB.
pub const RAL_COLORS: &[(u16, &str, Color32)] = &[
    (1003, "signal yellow", Color32::from_rgb(0xE5, 0xBE, 0x01)),
    (2009, "traffic orange", Color32::from_rgb(0xF5, 0x40, 0x21)),
    (2010, "signal orange", Color32::from_rgb(0xD4, 0x65, 0x2F)),
    (3020, "traffic red", Color32::from_rgb(0xCC, 0x06, 0x05)),
    (4008, "signal violet", Color32::from_rgb(0x92, 0x4E, 0x7D)),
    (5005, "signal blue", Color32::from_rgb(0x15, 0x48, 0x89)),
    (5015, "sky blue", Color32::from_rgb(0x22, 0x71, 0xB3)),
    (6032, "signal green", Color32::from_rgb(0x31, 0x7F, 0x43)),
    (7046, "telegrey 2", Color32::from_rgb(0x82, 0x89, 0x8F)),
    (7047, "telegrey 4", Color32::from_rgb(0xD0, 0xD0, 0xD0)),
    (9003, "signal white", Color32::from_rgb(0xF4, 0xF4, 0xF4)),
    (9004, "signal black", Color32::from_rgb(0x28, 0x28, 0x28)),
    (9011, "graphite black", Color32::from_rgb(0x27, 0x29, 0x2B)),
];
