pub fn wrap_prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

pub fn wrap_next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current + 1 >= len {
        0
    } else {
        current + 1
    }
}

pub fn grid_columns(available_width: u16, tile_width: u16) -> usize {
    if tile_width == 0 {
        return 1;
    }
    ((available_width / tile_width) as usize).max(1)
}

pub fn truncate_label(value: &str, max_chars: usize) -> String {
    let count = value.chars().count();
    if count <= max_chars {
        return value.to_string();
    }

    if max_chars <= 3 {
        return value.chars().take(max_chars).collect();
    }

    let prefix: String = value.chars().take(max_chars - 3).collect();
    format!("{}...", prefix)
}

pub fn scroll_offset(cursor_row: usize, visible: usize) -> usize {
    if visible == 0 {
        return cursor_row;
    }
    (cursor_row + 1).saturating_sub(visible)
}
