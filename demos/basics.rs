use otpkit::{
    build_auth_url, generate_base32_secret, Algorithm, AuthUrlParams, Totp,
    DEFAULT_SECRET_LENGTH,
};

fn main() {
    let secret = generate_base32_secret(DEFAULT_SECRET_LENGTH).unwrap();
    println!("secret   : {secret}");

    let totp = Totp::new(&secret).unwrap();
    let code = totp.generate().unwrap();
    println!("code     : {code}");
    println!("remaining: {}s", totp.ttl().unwrap());

    // A verifier with one step of clock-skew tolerance accepts it.
    let verifier = Totp::new(&secret).unwrap().with_window(1);
    println!("valid    : {}", verifier.validate(&code).unwrap());

    // Explicit counter access, RFC 4226 style.
    let hotp = Totp::new(&secret).unwrap();
    println!("hotp demo: {}", hotp.generate_hotp(57_856_320).unwrap());

    // Custom config: SHA-256, 8 digits, 60-second step.
    let custom_totp = Totp::new(&secret)
        .unwrap()
        .with_algorithm(Algorithm::Sha256)
        .with_digits(8)
        .with_period(60);
    println!("SHA256 8 : {}", custom_totp.generate().unwrap());

    // Provisioning URL for the authenticator app.
    let url = build_auth_url(&AuthUrlParams {
        account_name: "jsmith@x.com".to_string(),
        issuer: "Atlassian".to_string(),
        secret,
        algorithm: Some(Algorithm::Sha1),
        digits: Some(6),
        period: Some(30),
    });
    println!("enroll   : {url}");
}
