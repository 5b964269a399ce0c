use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct AppTheme {
    // General
    pub primary_background: Color,
    pub primary_foreground: Color,
    pub secondary_foreground: Color,
    pub tertiary_foreground: Color,
    pub border_primary: Color,
    pub border_accent: Color,
    pub highlight_style: Style, // Selected row
    pub error_text: Color,
    pub warning_text: Color,
    pub success_text: Color,
    pub info_text: Color,
    pub help_text: Color,

    // Status Bar
    pub status_bar_background: Color,
    pub status_bar_foreground: Color,
    pub status_bar_mode_normal_bg: Color,
    pub status_bar_mode_search_bg: Color,
    pub status_bar_mode_page_jump_bg: Color,
    pub status_bar_mode_confirm_delete_bg: Color,
    pub tab_active: Style,
    pub tab_inactive: Style,

    // Input Bar
    pub input_bar_background: Color,
    pub input_bar_text_fg: Color,
    pub input_bar_border: Color,

    // Record table
    pub table_title: Style,
    pub table_header: Style,
    pub row_busy: Style,
    pub empty_state: Style,

    // Counters and pagination
    pub counter_label: Style,
    pub counter_value: Style,
    pub page_active: Style,
    pub page_normal: Style,
    pub page_disabled: Style,

    // Log View
    pub log_title: Style,
    pub log_level_trace: Style,
    pub log_level_debug: Style,
    pub log_level_info: Style,
    pub log_level_warn: Style,
    pub log_level_error: Style,
    pub log_timestamp: Style,
    pub log_target: Style,

    // Popup
    pub popup_border: Color,
    pub popup_background: Color,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // General
            primary_background: Color::Reset, // Terminal default
            primary_foreground: Color::White,
            secondary_foreground: Color::Gray,
            tertiary_foreground: Color::DarkGray,
            border_primary: Color::DarkGray,
            border_accent: Color::Cyan,
            highlight_style: Style::default().add_modifier(Modifier::REVERSED),
            error_text: Color::Red,
            warning_text: Color::Yellow,
            success_text: Color::Green,
            info_text: Color::Cyan,
            help_text: Color::DarkGray,

            // Status Bar
            status_bar_background: Color::Blue,
            status_bar_foreground: Color::White,
            status_bar_mode_normal_bg: Color::LightCyan,
            status_bar_mode_search_bg: Color::LightMagenta,
            status_bar_mode_page_jump_bg: Color::LightGreen,
            status_bar_mode_confirm_delete_bg: Color::LightRed,
            tab_active: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),

            // Input Bar
            input_bar_background: Color::DarkGray,
            input_bar_text_fg: Color::White,
            input_bar_border: Color::White,

            // Record table
            table_title: Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
            table_header: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            row_busy: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            empty_state: Style::default().fg(Color::DarkGray),

            // Counters and pagination
            counter_label: Style::default().fg(Color::Gray),
            counter_value: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            page_active: Style::default().fg(Color::Black).bg(Color::LightCyan),
            page_normal: Style::default().fg(Color::White),
            page_disabled: Style::default().fg(Color::DarkGray),

            // Log View
            log_title: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            log_level_trace: Style::default().fg(Color::Magenta),
            log_level_debug: Style::default().fg(Color::Green),
            log_level_info: Style::default().fg(Color::Cyan),
            log_level_warn: Style::default().fg(Color::Yellow),
            log_level_error: Style::default().fg(Color::Red),
            log_timestamp: Style::default().fg(Color::DarkGray),
            log_target: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),

            // Popup
            popup_border: Color::Yellow,
            popup_background: Color::Black,
        }
    }
}
