fn main(){
    let width = 128;
    let height = 128;

    // a ring with a bar through it, like a small glyph
    write_distance_field(width, height, |x, y|{
        let x = x as f32 - 64.0;
        let y = y as f32 - 64.0;
        let radius = (x * x + y * y).sqrt();
        (radius > 30.0 && radius < 36.0) || (x.abs() < 3.0 && y.abs() < 33.0)
    });
}

fn write_distance_field(
    width: usize, height: usize,
    shape_function: impl Fn(usize, usize) -> bool
){
    use sed_distance_field::prelude::*;

    let mut shape = image::GrayImage::new(width as u32, height as u32);
    for (x, y, pixel) in shape.enumerate_pixels_mut() {
        *pixel = image::Luma([
            if shape_function(x as usize, y as usize) { 255_u8 } else { 0_u8 }
        ]);
    }

    let sampled = sampled_piston_image::of_u8_image(&shape);
    let config = FieldConfig::default().with_connectivity(Connectivity::Eight);

    let distance_field = compute_distance_image(&sampled, &config).unwrap();
    distance_field.to_gray_u8_image().unwrap().save("distance_field.png").unwrap();

    let exact = brute_force_distance_image(&sampled, &config).unwrap();
    let wrong_pixels = distance_field.as_slice().iter().zip(exact.as_slice())
        .filter(|(approximate, exact)| approximate != exact)
        .count();

    println!("{} of {} pixels differ from the exact field", wrong_pixels, width * height);
}
