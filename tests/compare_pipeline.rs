use sizecompare::core::processing::background::estimate_background;
use sizecompare::core::processing::crop::crop_to_region;
use sizecompare::core::processing::foreground::locate_foreground;
use sizecompare::{
    BackgroundRemover, CompareParams, CornerSampleRemover, IsolationStrategy, Pipeline, Raster,
};

const BACKDROP: [u8; 4] = [140, 140, 140, 255];

fn product_photo(w: usize, h: usize, rect: [usize; 4], colour: [u8; 4]) -> Raster {
    let [row_start, row_end, col_start, col_end] = rect;
    let mut r = Raster::filled(w, h, BACKDROP);
    for y in row_start..=row_end {
        for x in col_start..=col_end {
            r.put_pixel(x, y, colour);
        }
    }
    r
}

fn lowest_opaque_row(r: &Raster, cols: std::ops::Range<usize>) -> Option<usize> {
    (0..r.height())
        .rev()
        .find(|&y| cols.clone().any(|x| r.alpha(x, y) != 0))
}

#[test]
fn centered_product_on_gray_backdrop() {
    let photo = product_photo(600, 600, [150, 449, 200, 399], [20, 20, 20, 255]);

    let background = estimate_background(&photo);
    assert_eq!(background, 140);

    let found = locate_foreground(&photo, background, 10.0).unwrap();
    assert!(!found.is_degenerate());
    assert_eq!(found.region.row_start, 150);
    assert_eq!(found.region.row_end, 449);
    assert_eq!(found.region.col_start, 200);
    assert_eq!(found.region.col_end, 399);

    let cropped = crop_to_region(&photo, &found.region).unwrap();
    assert_eq!(cropped.dimensions(), (200, 300));
    assert_eq!(cropped.pixel(0, 0), [20, 20, 20, 255]);
}

#[test]
fn cropping_is_idempotent() {
    let photo = product_photo(600, 600, [150, 449, 200, 399], [20, 20, 20, 255]);
    let found = locate_foreground(&photo, 140, 10.0).unwrap();
    let cropped = crop_to_region(&photo, &found.region).unwrap();

    let again = locate_foreground(&cropped, 140, 10.0).unwrap();
    assert!(again.region.is_full_frame(cropped.width(), cropped.height()));
}

#[test]
fn heights_330_and_411_share_a_floor() {
    let mug = product_photo(400, 300, [40, 259, 100, 279], [30, 60, 200, 255]);
    let bottle = product_photo(300, 500, [20, 479, 120, 179], [20, 20, 20, 255]);

    let comparison = Pipeline::new(CompareParams::default())
        .unwrap()
        .compare(&mug, 330.0, &bottle, 411.0)
        .unwrap();

    assert_eq!(comparison.left.isolated_size, (180, 220));
    assert_eq!(comparison.right.isolated_size, (60, 460));
    assert_eq!(comparison.left.scaled_size.1, 330);
    assert_eq!(comparison.right.scaled_size.1, 411);
    // round(180 * 330 / 220) and round(60 * 411 / 460)
    assert_eq!(comparison.left.scaled_size.0, 270);
    assert_eq!(comparison.right.scaled_size.0, 54);

    let image = &comparison.image;
    let left_width = comparison.left.scaled_size.0;
    assert_eq!(image.height(), 411);
    assert_eq!(image.width(), left_width + comparison.right.scaled_size.0);
    assert_eq!(lowest_opaque_row(image, 0..left_width), Some(410));
    assert_eq!(lowest_opaque_row(image, left_width..image.width()), Some(410));
    // Above the shorter product is padding.
    assert_eq!(image.alpha(left_width / 2, 0), 0);
    assert_eq!(image.alpha(left_width / 2, 411 - 330), 255);
}

#[test]
fn strategies_agree_on_a_clean_backdrop() {
    let photo = product_photo(120, 90, [10, 69, 30, 89], [10, 10, 10, 255]);
    for isolation in [IsolationStrategy::Corners, IsolationStrategy::Otsu] {
        let comparison = Pipeline::new(CompareParams {
            isolation,
            ..CompareParams::default()
        })
        .unwrap()
        .compare(&photo, 60.0, &photo, 30.0)
        .unwrap();
        let (lw, lh) = comparison.left.scaled_size;
        let (rw, rh) = comparison.right.scaled_size;
        assert_eq!((lh, rh), (60, 30), "{isolation}");
        // Otsu keeps a blurred edge pixel or so around the product.
        assert!(lw.abs_diff(60) <= 1, "{isolation}: {lw}");
        assert!(rw.abs_diff(30) <= 1, "{isolation}: {rw}");
        assert_eq!(comparison.image.height(), 60);
    }
}

#[test]
fn remover_reports_background_and_region() {
    let photo = product_photo(50, 40, [5, 34, 10, 29], [0, 0, 0, 255]);
    let isolation = CornerSampleRemover::new(10.0)
        .remove_background(&photo)
        .unwrap();
    assert_eq!(isolation.background, Some(140));
    assert_eq!(isolation.raster.dimensions(), (20, 30));
    assert!(!isolation.degenerate);
}
