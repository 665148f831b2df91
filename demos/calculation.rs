use pv_row_spacing::{
    daily_profile, evaluate_at_label, DesignConditions, GeoLocation, HeightSource, MarginConfig,
    PanelGeometry,
};

fn main() -> pv_row_spacing::Result<()> {
    let tokyo = GeoLocation::new(35.68, 139.77)?;

    let conditions = DesignConditions {
        height: HeightSource::Panel(PanelGeometry::default()),
        margin: MarginConfig::Factor(1.1),
        ..DesignConditions::default()
    };

    let r = evaluate_at_label(&conditions, &tokyo, "12:00")?;
    let profile = daily_profile(&conditions, &tokyo);

    println!("=== Row Spacing Calculation Example ===");
    println!(
        "Location: Tokyo ({:.2}°N, {:.2}°E), winter solstice {}",
        tokyo.latitude,
        tokyo.longitude,
        r.time.format("%H:%M")
    );
    println!();
    println!("--- Solar Position ---");
    println!("Declination: {:.2}°", r.solar_position.declination);
    println!("Local Solar Time: {:.2} hours", r.solar_position.local_solar_time);
    println!("Hour Angle: {:.2}°", r.solar_position.hour_angle);
    println!("Altitude: {:.2}°", r.solar_position.altitude);
    println!("Azimuth: {:.2}° (0°=N, 90°=E, 180°=S)", r.solar_position.azimuth);
    println!();
    println!("--- Shadow ---");
    println!("Top GL height: {:.3} m", r.top_height_m);
    println!("Basic shadow: {:?}", r.shadow.basic);
    println!("Row-axis shadow: {:.2} m", r.shadow.row);
    println!(
        "Recommended spacing: {:.2} m ({})",
        r.spacing.recommended_spacing, r.margin
    );
    println!();
    println!("--- Daily Profile ---");
    for p in profile.points() {
        println!("{}: {:.2} m", p.label(), p.spacing);
    }
    let g = profile.governing();
    println!("Governing hour: {} ({:.2} m)", g.label(), g.spacing);
    Ok(())
}
