use anyhow::{bail, Result};

pub type FormatHint = (egl::Int, egl::Int);

const PREFERRED_BUFFER_SIZE: egl::Int = 32;

const STOCK_HINTS: &[FormatHint] = &[
    (egl::SURFACE_TYPE, egl::WINDOW_BIT),
    (egl::RED_SIZE, 1),
    (egl::GREEN_SIZE, 1),
    (egl::BLUE_SIZE, 1),
    (egl::ALPHA_SIZE, 1),
    (egl::RENDERABLE_TYPE, egl::OPENGL_ES2_BIT),
];

pub fn config_attribs(extra: &[FormatHint]) -> Vec<egl::Int> {
    STOCK_HINTS
        .iter()
        .chain(extra)
        .flat_map(|&(attr, value)| [attr, value])
        .chain(std::iter::once(egl::NONE))
        .collect()
}

pub fn select_by_buffer_size<C, F>(
    candidates: impl IntoIterator<Item = C>,
    mut buffer_size: F,
) -> Result<C>
where
    F: FnMut(&C) -> Result<egl::Int>,
{
    for candidate in candidates {
        let size = buffer_size(&candidate)?;
        if size == PREFERRED_BUFFER_SIZE {
            return Ok(candidate);
        }
        log::trace!("skipping config with buffer size {}", size);
    }

    bail!(
        "did not find config with buffer size {}",
        PREFERRED_BUFFER_SIZE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn pick(sizes: &[egl::Int]) -> Result<usize> {
        select_by_buffer_size(0..sizes.len(), |&i| Ok(sizes[i]))
    }

    #[test_case(&[16, 24, 32, 32], 2)]
    #[test_case(&[32], 0)]
    #[test_case(&[24, 32, 16, 32], 1)]
    fn first_exact_match(sizes: &[egl::Int], expected: usize) {
        assert_eq!(pick(sizes).unwrap(), expected);
    }

    #[test_case(&[] ; "empty")]
    #[test_case(&[16, 24] ; "too small")]
    #[test_case(&[24, 64] ; "no exact")]
    fn no_match_names_size(sizes: &[egl::Int]) {
        let err = pick(sizes).unwrap_err().to_string();
        assert!(err.contains("32"), "{}", err);
    }

    #[test]
    fn attribute_query_failure_propagates() {
        let res = select_by_buffer_size([1, 2], |_| bail!("bad config"));
        assert_eq!(res.unwrap_err().to_string(), "bad config");
    }

    #[test]
    fn extra_hints_follow_stock_ones() {
        let attribs = config_attribs(&[(egl::DEPTH_SIZE, 4)]);

        assert_eq!(attribs.len(), STOCK_HINTS.len() * 2 + 3);
        assert_eq!(&attribs[..2], &[egl::SURFACE_TYPE, egl::WINDOW_BIT]);
        assert_eq!(
            &attribs[attribs.len() - 3..],
            &[egl::DEPTH_SIZE, 4, egl::NONE]
        );
    }

    #[test]
    fn stock_hints_only() {
        let attribs = config_attribs(&[]);
        assert_eq!(attribs.last(), Some(&egl::NONE));
        assert_eq!(attribs.len() % 2, 1);
    }
}
